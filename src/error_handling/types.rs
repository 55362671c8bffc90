//! Error type definitions.
//!
//! This module defines the error taxonomy used throughout the application.
//! Hard failures (`LoadError`, `SchemaError`) abort the current render
//! cycle; soft outcomes (`Notice`) are collected and reported alongside the
//! results without being treated as failures.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// The source could not be fetched or parsed as tabular data.
///
/// Callers holding a previously cached record set keep serving it; a
/// `LoadError` only surfaces when no last good set exists.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport-level failure reaching the source.
    #[error("failed to fetch visitor data: {0}")]
    Http(#[from] ReqwestError),

    /// The source answered with a non-success HTTP status.
    #[error("source returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code received.
        status: u16,
        /// URL that was fetched.
        url: String,
    },

    /// The source answered with an empty body.
    #[error("source returned an empty body for {url}")]
    EmptyBody {
        /// URL that was fetched.
        url: String,
    },

    /// The body could not be read as CSV.
    #[error("failed to parse visitor data as CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns were absent after header normalization.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Required columns are absent after header normalization.
///
/// Names both the missing columns and the columns actually found, so a
/// misconfigured sheet can be diagnosed from the error message alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required columns {missing:?}; columns found: {found:?}")]
pub struct SchemaError {
    /// Required columns not present in the source.
    pub missing: Vec<String>,
    /// Normalized column names that were present.
    pub found: Vec<String>,
}

/// Soft, non-fatal outcomes of a render cycle.
///
/// These are reported to the caller and rendered as explicit indications
/// ("no data", "insufficient data") rather than as empty output or errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The filter/search combination matched zero rows.
    EmptyResult,
    /// The rolling trend was skipped because too few distinct dates exist.
    InsufficientData {
        /// Number of distinct dates that were available.
        distinct_dates: usize,
    },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EmptyResult => f.write_str("no rows match the current filter selection"),
            Notice::InsufficientData { distinct_dates } => write!(
                f,
                "trend skipped: only {} distinct date{} available",
                distinct_dates,
                if *distinct_dates == 1 { "" } else { "s" }
            ),
        }
    }
}

/// Reasons a source row was dropped or degraded during loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum DropReason {
    /// The timestamp cell was empty; the row was discarded.
    MissingTimestamp,
    /// The timestamp cell did not parse as a date-time; the row was discarded.
    UnparseableTimestamp,
    /// The latitude cell did not parse as numeric; the row was kept without it.
    BadLatitude,
    /// The longitude cell did not parse as numeric; the row was kept without it.
    BadLongitude,
}

impl DropReason {
    /// Returns a human-readable string representation of the drop reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingTimestamp => "Row dropped: missing timestamp",
            DropReason::UnparseableTimestamp => "Row dropped: unparseable timestamp",
            DropReason::BadLatitude => "Latitude discarded: not numeric",
            DropReason::BadLongitude => "Longitude discarded: not numeric",
        }
    }

    /// Whether this reason discards the whole row (as opposed to one field).
    pub fn drops_row(&self) -> bool {
        matches!(
            self,
            DropReason::MissingTimestamp | DropReason::UnparseableTimestamp
        )
    }
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_schema_error_names_columns() {
        let err = SchemaError {
            missing: vec!["timestamp".into()],
            found: vec!["ip".into(), "country".into()],
        };
        let message = err.to_string();
        assert!(message.contains("timestamp"));
        assert!(message.contains("ip"));
        assert!(message.contains("country"));
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(
            Notice::InsufficientData { distinct_dates: 3 }.to_string(),
            "trend skipped: only 3 distinct dates available"
        );
        assert_eq!(
            Notice::InsufficientData { distinct_dates: 1 }.to_string(),
            "trend skipped: only 1 distinct date available"
        );
        assert!(Notice::EmptyResult.to_string().contains("no rows"));
    }

    #[test]
    fn test_all_drop_reasons_have_string_representation() {
        for reason in DropReason::iter() {
            assert!(
                !reason.as_str().is_empty(),
                "{:?} should have non-empty string",
                reason
            );
        }
    }

    #[test]
    fn test_drop_reason_row_scope() {
        assert!(DropReason::MissingTimestamp.drops_row());
        assert!(DropReason::UnparseableTimestamp.drops_row());
        assert!(!DropReason::BadLatitude.drops_row());
        assert!(!DropReason::BadLongitude.drops_row());
    }
}
