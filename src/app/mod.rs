//! Terminal rendering of the report.
//!
//! User-facing output formatting lives here; the library's `run` module
//! computes, this module prints. Chart and map rendering proper are
//! external concerns - what gets printed for them is their input contract
//! (buckets, trend points, marker counts).

use colored::*;

use crate::aggregate::{Bucket, GroupKey, TrendOutcome};
use crate::error_handling::LoadStats;
use crate::model::VisitorRecord;
use crate::present::Summary;
use crate::table::Page;

/// Prints the headline metrics of the filtered view.
pub(crate) fn print_summary(summary: &Summary) {
    println!("{}", "Visitor summary".bold());
    println!("  visits:          {}", summary.total_visits);
    println!("  unique visitors: {}", summary.unique_visitors);
    println!("  countries:       {}", summary.countries);
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!("  date span:       {} .. {}", first, last);
    }
}

/// Prints the aggregation buckets as a labeled count list.
pub(crate) fn print_buckets(key: GroupKey, buckets: &[Bucket]) {
    println!();
    println!("{} {}", "Visits by".bold(), key.to_string().bold());
    let width = buckets.iter().map(|b| b.label.len()).max().unwrap_or(0);
    for bucket in buckets {
        println!("  {:width$}  {}", bucket.label, bucket.count, width = width);
    }
}

/// Prints the rolling trend, or the explicit insufficient-data indication.
pub(crate) fn print_trend(outcome: &TrendOutcome) {
    match outcome {
        TrendOutcome::Series(points) => {
            println!();
            println!(
                "{}",
                format!("Trend ({}-day centered mean)", crate::config::ROLLING_WINDOW).bold()
            );
            for point in points {
                match point.rolling {
                    Some(mean) => {
                        println!("  {}  {:>5}  {:>8.2}", point.date, point.count, mean)
                    }
                    None => println!("  {}  {:>5}  {:>8}", point.date, point.count, "-"),
                }
            }
        }
        TrendOutcome::InsufficientData { distinct_dates } => {
            println!();
            println!(
                "{}",
                format!(
                    "Trend skipped: insufficient data ({} distinct dates, need {})",
                    distinct_dates,
                    crate::config::MIN_TREND_DATES
                )
                .yellow()
            );
        }
    }
}

/// Prints one page of the log table.
pub(crate) fn print_table(page: &Page<'_, &VisitorRecord>) {
    println!();
    println!(
        "{} (page {}/{}, {} rows total)",
        "Visitor log".bold(),
        page.page,
        page.total_pages,
        page.total_items
    );
    println!(
        "{}",
        format!(
            "  {:19}  {:15}  {:12}  {:10}  {}",
            "timestamp", "ip", "country", "device", "browser"
        )
        .dimmed()
    );
    for record in page.items {
        println!(
            "  {:19}  {:15}  {:12}  {:10}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.ip,
            record.country.as_deref().unwrap_or("-"),
            record.device.as_deref().unwrap_or("-"),
            record.browser.as_deref().unwrap_or("-")
        );
    }
}

/// Prints the explicit empty-state indication for a zero-row view.
pub(crate) fn print_no_data() {
    println!();
    println!(
        "{}",
        "No data for the current filter selection.".yellow().bold()
    );
}

/// Prints how many rows carry coordinates usable for the map view.
pub(crate) fn print_marker_count(markers: usize) {
    println!();
    println!("Map markers with valid coordinates: {}", markers);
}

/// Prints load-time drop statistics, one line per non-zero reason.
pub(crate) fn print_drop_statistics(stats: &LoadStats) {
    let snapshot = stats.snapshot();
    if snapshot.is_empty() {
        return;
    }
    log::info!("Load statistics:");
    for (reason, count) in snapshot {
        log::info!("  {}: {}", reason, count);
    }
}
