//! Shared test helpers.

use chrono::NaiveDateTime;
use visitor_analytics::model::{RecordFields, VisitorRecord};

/// Parses a `%Y-%m-%d %H:%M` timestamp for test data.
pub fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("test timestamp")
}

/// Builds a record with the fields most tests care about.
pub fn record(
    timestamp: &str,
    ip: &str,
    country: Option<&str>,
    device: Option<&str>,
    browser: Option<&str>,
) -> VisitorRecord {
    VisitorRecord::new(
        ts(timestamp),
        RecordFields {
            ip: ip.to_string(),
            country: country.map(str::to_string),
            device: device.map(str::to_string),
            browser: browser.map(str::to_string),
            ..Default::default()
        },
    )
}

/// A small mixed set spanning two days, two countries, and two devices.
#[allow(dead_code)] // Not every test binary uses the full set
pub fn sample_rows() -> Vec<VisitorRecord> {
    vec![
        record(
            "2024-01-01 10:00",
            "203.0.113.1",
            Some("US"),
            Some("Mobile"),
            Some("Chrome"),
        ),
        record(
            "2024-01-01 14:00",
            "203.0.113.2",
            Some("US"),
            Some("Desktop"),
            Some("Firefox"),
        ),
        record(
            "2024-01-02 09:00",
            "203.0.113.3",
            Some("FR"),
            Some("Mobile"),
            Some("Chrome"),
        ),
        record(
            "2024-01-02 21:00",
            "203.0.113.1",
            Some("DE"),
            Some("Tablet"),
            Some("Safari"),
        ),
    ]
}
