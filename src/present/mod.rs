//! Presentation adapter: chart-ready records, map markers, summary metrics.
//!
//! Rendering itself (charts, map tiles, widgets) is an external concern;
//! these types are the input contract handed to whatever consumer draws
//! them.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{Bucket, TrendOutcome};
use crate::model::VisitorRecord;

/// One chart-ready record: a labeled count, optionally with a rolling mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Bucket label on the chart axis.
    pub label: String,
    /// Row count of the bucket.
    pub count: usize,
    /// Rolling mean at this point, for trend charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling: Option<f64>,
}

/// One map marker, built only from rows with valid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Visitor identifier for the marker popup.
    pub ip: String,
    /// City, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Headline metrics of the current filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Rows in the view.
    pub total_visits: usize,
    /// Distinct visitor identifiers.
    pub unique_visitors: usize,
    /// Distinct countries.
    pub countries: usize,
    /// Earliest visit date, absent for an empty view.
    pub first_date: Option<NaiveDate>,
    /// Latest visit date, absent for an empty view.
    pub last_date: Option<NaiveDate>,
}

/// Maps aggregation buckets to chart-ready records.
pub fn chart_points(buckets: &[Bucket]) -> Vec<ChartPoint> {
    buckets
        .iter()
        .map(|bucket| ChartPoint {
            label: bucket.label.clone(),
            count: bucket.count,
            rolling: None,
        })
        .collect()
}

/// Maps a trend outcome to chart-ready records; insufficient data yields none.
pub fn trend_points(outcome: &TrendOutcome) -> Vec<ChartPoint> {
    match outcome {
        TrendOutcome::Series(points) => points
            .iter()
            .map(|point| ChartPoint {
                label: point.date.to_string(),
                count: point.count,
                rolling: point.rolling,
            })
            .collect(),
        TrendOutcome::InsufficientData { .. } => Vec::new(),
    }
}

/// Builds map markers from the rows that carry valid coordinates.
///
/// Rows without coordinates are excluded here but remain part of the row
/// set for every other view.
pub fn map_markers(rows: &[&VisitorRecord]) -> Vec<MapMarker> {
    rows.iter()
        .filter_map(|record| match (record.lat, record.lon) {
            (Some(lat), Some(lon)) => Some(MapMarker {
                lat,
                lon,
                ip: record.ip.clone(),
                city: record.city.clone(),
                country: record.country.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Computes the headline metrics of `rows`.
pub fn summarize(rows: &[&VisitorRecord]) -> Summary {
    let unique_visitors = rows.iter().map(|r| r.ip.as_str()).collect::<HashSet<_>>().len();
    let countries = rows
        .iter()
        .filter_map(|r| r.country.as_deref())
        .collect::<HashSet<_>>()
        .len();
    Summary {
        total_visits: rows.len(),
        unique_visitors,
        countries,
        first_date: rows.iter().map(|r| r.date).min(),
        last_date: rows.iter().map(|r| r.date).max(),
    }
}
