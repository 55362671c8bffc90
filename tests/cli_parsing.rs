//! CLI parsing tests.

use clap::Parser;
use visitor_analytics::aggregate::{DayNamePolicy, GroupKey};
use visitor_analytics::filter::TimeBucket;
use visitor_analytics::Config;

const URL: &str = "https://example.com/sheet/export?format=csv";

#[test]
fn source_url_is_required() {
    let result = Config::try_parse_from(["visitor_analytics"]);
    assert!(result.is_err());
}

#[test]
fn full_filter_surface_parses() {
    let config = Config::try_parse_from([
        "visitor_analytics",
        URL,
        "--from",
        "2024-01-01",
        "--to",
        "2024-01-31",
        "--country",
        "US",
        "--device",
        "Mobile",
        "--browser",
        "Chrome",
        "--time-bucket",
        "evening",
        "--search",
        "fiber",
        "--group-by",
        "browser",
        "--day-name-policy",
        "omit",
        "--ascending",
        "--page",
        "3",
        "--page-size",
        "50",
    ])
    .expect("full surface should parse");

    assert_eq!(config.source, URL);
    assert_eq!(config.country.as_deref(), Some("US"));
    assert_eq!(config.time_bucket, TimeBucket::Evening);
    assert_eq!(config.group_by, GroupKey::Browser);
    assert_eq!(config.day_name_policy, DayNamePolicy::Omit);
    assert!(config.ascending);
    assert_eq!(config.page, 3);
    assert_eq!(config.page_size, 50);
}

#[test]
fn group_by_accepts_every_key() {
    for key in [
        "date", "hour", "week", "day-name", "country", "region", "city", "isp", "device",
        "browser",
    ] {
        let result = Config::try_parse_from(["visitor_analytics", URL, "--group-by", key]);
        assert!(result.is_ok(), "--group-by {} should parse", key);
    }
}

#[test]
fn unknown_group_key_is_rejected() {
    let result = Config::try_parse_from(["visitor_analytics", URL, "--group-by", "continent"]);
    assert!(result.is_err());
}

#[test]
fn clear_flags_parse() {
    let config = Config::try_parse_from([
        "visitor_analytics",
        URL,
        "--clear",
        "--clear-endpoint",
        "https://example.com/hooks/clear",
    ])
    .expect("clear flags should parse");
    assert!(config.clear);
    assert_eq!(
        config.clear_endpoint.as_deref(),
        Some("https://example.com/hooks/clear")
    );
}

#[test]
fn export_dash_means_stdout() {
    let config = Config::try_parse_from(["visitor_analytics", URL, "--export", "-"])
        .expect("export flag should parse");
    assert_eq!(config.export.as_deref().and_then(|p| p.to_str()), Some("-"));
}
