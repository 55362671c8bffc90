//! visitor_analytics library: the visitor filter-and-aggregate pipeline
//!
//! This library loads visitor-tracking rows (timestamp, IP, geolocation,
//! device, browser) from a published CSV export, applies user-selected
//! filters, aggregates the result into chart-ready buckets, and supports
//! the paginated log table and CSV export of the dashboard.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use visitor_analytics::{run_report, AppState, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::parse_from([
//!     "visitor_analytics",
//!     "https://example.com/sheet/export?format=csv",
//!     "--country",
//!     "US",
//! ]);
//!
//! let state = AppState::new(&config)?;
//! let report = run_report(&state, &config).await?;
//! println!("{} of {} rows matched", report.filtered_rows, report.total_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod aggregate;
mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod filter;
pub mod initialization;
pub mod loader;
pub mod model;
pub mod present;
pub mod table;
mod upstream;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::{run_report, AppState, ReportSummary};

// Internal run module (contains the render-cycle orchestration)
mod run {
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::{error, info};

    use crate::aggregate::{self, GroupKey, TrendOutcome};
    use crate::app;
    use crate::config::Config;
    use crate::error_handling::{InitializationError, LoadStats, Notice};
    use crate::export::export_csv;
    use crate::filter::FilterSet;
    use crate::initialization::init_client;
    use crate::loader::{self, SheetCache};
    use crate::model::VisitorRecord;
    use crate::{present, table, upstream};

    /// Shared application state passed into each render cycle.
    ///
    /// Holds the HTTP client, the swappable record-set cache, and the load
    /// statistics. Successive render cycles against the same state share
    /// the cache, so calls within the TTL window do not refetch.
    pub struct AppState {
        client: reqwest::Client,
        cache: SheetCache,
        stats: LoadStats,
    }

    impl AppState {
        /// Builds the shared state from the configuration.
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP client cannot be constructed.
        pub fn new(config: &Config) -> Result<Self, InitializationError> {
            Ok(AppState {
                client: init_client(config)?,
                cache: SheetCache::new(Duration::from_secs(config.cache_ttl_secs)),
                stats: LoadStats::new(),
            })
        }
    }

    /// Results of one render cycle.
    #[derive(Debug, Clone)]
    pub struct ReportSummary {
        /// Rows in the loaded record set.
        pub total_rows: usize,
        /// Rows remaining after filtering.
        pub filtered_rows: usize,
        /// Rows written by the export, when one was requested.
        pub exported_rows: Option<usize>,
        /// Soft outcomes of the cycle (empty result, insufficient trend data).
        pub notices: Vec<Notice>,
        /// Whether the upstream clear endpoint accepted the request, when
        /// `--clear` was given.
        pub upstream_cleared: Option<bool>,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs one render cycle with the provided configuration.
    ///
    /// This is the main entry point for the library. It loads the record
    /// set (serving the cache within its TTL), applies the configured
    /// filters, aggregates and prints the selected views, and optionally
    /// exports the filtered rows or clears the cached/upstream data.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The source URL is invalid
    /// - The source cannot be fetched or parsed and no previously cached
    ///   set exists to fall back to
    /// - Required columns are absent from the source
    /// - The export file cannot be written
    pub async fn run_report(state: &AppState, config: &Config) -> Result<ReportSummary> {
        let start_time = std::time::Instant::now();
        let mut notices = Vec::new();

        url::Url::parse(&config.source)
            .with_context(|| format!("invalid source URL: {}", config.source))?;

        let upstream_cleared = if config.clear {
            state.cache.invalidate();
            info!("cached record set invalidated");
            match upstream::clear_upstream(&state.client, config.clear_endpoint.as_deref()).await {
                Ok(accepted) => Some(accepted),
                Err(e) => {
                    error!("upstream clear failed: {:#}", e);
                    Some(false)
                }
            }
        } else {
            None
        };

        let set = loader::load(&state.client, &state.cache, &state.stats, &config.source)
            .await
            .context("failed to load visitor data")?;

        let filters = FilterSet::from_config(config);
        let rows = filters.apply(set.records.iter());
        info!(
            "{} of {} rows match {} filter{}",
            rows.len(),
            set.len(),
            filters.len(),
            if filters.len() == 1 { "" } else { "s" }
        );

        if rows.is_empty() {
            notices.push(Notice::EmptyResult);
            app::print_no_data();
        } else {
            app::print_summary(&present::summarize(&rows));

            let buckets = aggregate::aggregate(&rows, config.group_by, config.day_name_policy);
            app::print_buckets(config.group_by, &buckets);

            if config.group_by == GroupKey::Date {
                let outcome = aggregate::trend(&rows);
                if let TrendOutcome::InsufficientData { distinct_dates } = outcome {
                    notices.push(Notice::InsufficientData { distinct_dates });
                }
                app::print_trend(&outcome);
            }

            app::print_marker_count(present::map_markers(&rows).len());
        }

        let mut table_rows: Vec<&VisitorRecord> = rows.clone();
        table::sort_by_timestamp(&mut table_rows, config.ascending);
        let page = table::paginate(&table_rows, config.page, config.page_size);
        if !table_rows.is_empty() {
            app::print_table(&page);
        }

        let exported_rows = match &config.export {
            Some(path) => {
                let output = if path.as_os_str() == "-" {
                    None
                } else {
                    Some(path.as_path())
                };
                let written = export_csv(&table_rows, &set.schema, output)
                    .context("failed to export filtered rows")?;
                info!("exported {} rows", written);
                Some(written)
            }
            None => None,
        };

        app::print_drop_statistics(&state.stats);

        Ok(ReportSummary {
            total_rows: set.len(),
            filtered_rows: rows.len(),
            exported_rows,
            notices,
            upstream_cleared,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
