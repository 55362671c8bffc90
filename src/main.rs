//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `visitor_analytics` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use visitor_analytics::initialization::init_logger_with;
use visitor_analytics::{run_report, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("visitor_analytics error: {:#}", e);
            process::exit(1);
        }
    };

    // Run one render cycle using the library
    match run_report(&state, &config).await {
        Ok(report) => {
            println!(
                "✅ Matched {} of {} row{} in {:.1}s",
                report.filtered_rows,
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            if let Some(written) = report.exported_rows {
                println!(
                    "Exported {} row{}",
                    written,
                    if written == 1 { "" } else { "s" }
                );
            }
            for notice in &report.notices {
                println!("ℹ️  {}", notice);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("visitor_analytics error: {:#}", e);
            process::exit(1);
        }
    }
}
