//! CSV parsing and type coercion.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use crate::error_handling::{DropReason, LoadError, LoadStats, SchemaError};
use crate::model::{ColumnSchema, RecordFields, RecordSet, VisitorRecord};

/// Date-time layouts accepted for the `timestamp` column, tried in order.
///
/// RFC 3339 (with offset) is tried first, separately, since it is what
/// sheet exports most commonly emit.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Permissive date-time parsing for the `timestamp` column.
///
/// Returns `None` when no accepted layout matches; the row is then dropped
/// by the caller. A bare date is accepted as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_utc());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Normalizes header names: trim whitespace, lowercase.
pub fn normalize_headers(headers: &csv::StringRecord) -> Vec<String> {
    headers
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect()
}

/// Parses the body of a source fetch into a record set.
///
/// Headers are normalized before the schema check; rows whose timestamp is
/// missing or unparseable are dropped and counted in `stats`; non-numeric
/// lat/lon cells are counted and the row kept without them.
pub fn parse_records(body: &str, url: &str, stats: &LoadStats) -> Result<RecordSet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = normalize_headers(reader.headers()?);
    let schema = ColumnSchema::from_headers(&headers);
    let missing = schema.missing_required();
    if !missing.is_empty() {
        return Err(SchemaError {
            missing: missing.iter().map(|s| s.to_string()).collect(),
            found: headers,
        }
        .into());
    }

    let index_of = |name: &str| headers.iter().position(|h| h == name);
    let timestamp_idx = index_of("timestamp");
    let ip_idx = index_of("ip");
    let country_idx = index_of("country");
    let region_idx = index_of("region");
    let city_idx = index_of("city");
    let isp_idx = index_of("isp");
    let device_idx = index_of("device");
    let browser_idx = index_of("browser");
    let lat_idx = index_of("lat");
    let lon_idx = index_of("lon");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(timestamp_cell) = cell(&row, timestamp_idx) else {
            stats.increment(DropReason::MissingTimestamp);
            continue;
        };
        let Some(timestamp) = parse_timestamp(timestamp_cell) else {
            stats.increment(DropReason::UnparseableTimestamp);
            debug!("dropping row with unparseable timestamp {:?}", timestamp_cell);
            continue;
        };

        let lat = coerce_coordinate(cell(&row, lat_idx), DropReason::BadLatitude, stats);
        let lon = coerce_coordinate(cell(&row, lon_idx), DropReason::BadLongitude, stats);

        records.push(VisitorRecord::new(
            timestamp,
            RecordFields {
                ip: cell(&row, ip_idx).unwrap_or_default().to_string(),
                country: cell(&row, country_idx).map(str::to_string),
                region: cell(&row, region_idx).map(str::to_string),
                city: cell(&row, city_idx).map(str::to_string),
                isp: cell(&row, isp_idx).map(str::to_string),
                device: cell(&row, device_idx).map(str::to_string),
                browser: cell(&row, browser_idx).map(str::to_string),
                lat,
                lon,
            },
        ));
    }

    Ok(RecordSet {
        records,
        schema,
        source_url: url.to_string(),
    })
}

/// A trimmed, non-empty cell at the given column index.
fn cell<'a>(row: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = row.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Coerces a coordinate cell to numeric; a present but non-numeric cell is
/// counted and becomes missing.
fn coerce_coordinate(
    value: Option<&str>,
    reason: DropReason,
    stats: &LoadStats,
) -> Option<f64> {
    let value = value?;
    match value.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            stats.increment(reason);
            None
        }
    }
}
