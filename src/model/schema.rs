//! Column presence schema.
//!
//! The source export may carry any subset of the expected columns. Presence
//! is established once, right after header normalization, and every later
//! stage consults these flags instead of re-checking per feature.

use crate::config::{EXPECTED_COLUMNS, REQUIRED_COLUMNS};

/// Per-column presence flags for one loaded record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    /// `timestamp` column present.
    pub timestamp: bool,
    /// `ip` column present.
    pub ip: bool,
    /// `country` column present.
    pub country: bool,
    /// `region` column present.
    pub region: bool,
    /// `city` column present.
    pub city: bool,
    /// `isp` column present.
    pub isp: bool,
    /// `device` column present.
    pub device: bool,
    /// `browser` column present.
    pub browser: bool,
    /// `lat` column present.
    pub lat: bool,
    /// `lon` column present.
    pub lon: bool,
}

impl ColumnSchema {
    /// Builds the schema from normalized (trimmed, lowercased) header names.
    pub fn from_headers(headers: &[String]) -> Self {
        let has = |name: &str| headers.iter().any(|h| h == name);
        ColumnSchema {
            timestamp: has("timestamp"),
            ip: has("ip"),
            country: has("country"),
            region: has("region"),
            city: has("city"),
            isp: has("isp"),
            device: has("device"),
            browser: has("browser"),
            lat: has("lat"),
            lon: has("lon"),
        }
    }

    /// Whether the named expected column is present.
    pub fn has(&self, column: &str) -> bool {
        match column {
            "timestamp" => self.timestamp,
            "ip" => self.ip,
            "country" => self.country,
            "region" => self.region,
            "city" => self.city,
            "isp" => self.isp,
            "device" => self.device,
            "browser" => self.browser,
            "lat" => self.lat,
            "lon" => self.lon,
            _ => false,
        }
    }

    /// Required columns that are absent, in canonical order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !self.has(column))
            .collect()
    }

    /// Present expected columns, in canonical order.
    pub fn present_columns(&self) -> Vec<&'static str> {
        EXPECTED_COLUMNS
            .iter()
            .copied()
            .filter(|column| self.has(column))
            .collect()
    }
}
