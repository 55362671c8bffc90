//! Configuration types and CLI options.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::aggregate::{DayNamePolicy, GroupKey};
use crate::config::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::filter::TimeBucket;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options except the source URL have defaults and can be overridden via
/// command-line flags. Each flag mirrors one control of the dashboard surface:
/// date range, country, device, browser, time-of-day bucket, free-text search,
/// sort direction, grouping mode, and pagination.
///
/// # Examples
///
/// ```bash
/// # Basic usage: report on everything, grouped by date
/// visitor_analytics "https://example.com/sheet/export?format=csv"
///
/// # Filter to one country and group by browser
/// visitor_analytics <URL> --country US --group-by browser
///
/// # Second page of the log table, oldest first
/// visitor_analytics <URL> --page 2 --ascending
///
/// # Export the filtered rows to a file
/// visitor_analytics <URL> --from 2024-01-01 --to 2024-01-31 --export visits.csv
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "visitor_analytics",
    about = "Loads visitor tracking rows from a published CSV export and reports filtered, aggregated analytics."
)]
pub struct Config {
    /// CSV export URL to load visitor rows from
    #[arg(value_parser)]
    pub source: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Start of the inclusive date range filter (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End of the inclusive date range filter (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Only keep rows from this country ("All" disables the constraint)
    #[arg(long)]
    pub country: Option<String>,

    /// Only keep rows from this device category ("All" disables the constraint)
    #[arg(long)]
    pub device: Option<String>,

    /// Only keep rows from this browser ("All" disables the constraint)
    #[arg(long)]
    pub browser: Option<String>,

    /// Time-of-day bucket to keep: all-day|morning|afternoon|evening|night
    #[arg(long, value_enum, default_value_t = TimeBucket::AllDay)]
    pub time_bucket: TimeBucket,

    /// Case-insensitive substring matched against every field of a row
    #[arg(long)]
    pub search: Option<String>,

    /// Grouping key for the aggregation view
    #[arg(long, value_enum, default_value_t = GroupKey::Date)]
    pub group_by: GroupKey,

    /// Whether day-name buckets with zero rows appear with count 0 or are omitted
    #[arg(long, value_enum, default_value_t = DayNamePolicy::ZeroFill)]
    pub day_name_policy: DayNamePolicy,

    /// Sort the log table oldest-first instead of the default newest-first
    #[arg(long, default_value_t = false)]
    pub ascending: bool,

    /// 1-indexed page of the log table to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page of the log table
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Write the filtered rows as CSV to this path ("-" for stdout)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Invalidate the cached record set before loading
    #[arg(long, default_value_t = false)]
    pub clear: bool,

    /// Optional endpoint POSTed to when --clear is given, to delete upstream data
    #[arg(long)]
    pub clear_endpoint: Option<String>,

    /// Cached record set time-to-live in seconds
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["visitor_analytics", "http://example.com/x.csv"])
            .expect("minimal invocation should parse");
        assert_eq!(config.page, 1);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(!config.ascending);
        assert!(!config.clear);
        assert!(config.export.is_none());
        assert!(matches!(config.group_by, GroupKey::Date));
        assert!(matches!(config.time_bucket, TimeBucket::AllDay));
    }

    #[test]
    fn test_date_flags_parse() {
        let config = Config::try_parse_from([
            "visitor_analytics",
            "http://example.com/x.csv",
            "--from",
            "2024-01-01",
            "--to",
            "2024-02-01",
        ])
        .expect("date flags should parse");
        assert_eq!(config.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(config.to, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Config::try_parse_from([
            "visitor_analytics",
            "http://example.com/x.csv",
            "--from",
            "not-a-date",
        ]);
        assert!(result.is_err());
    }
}
