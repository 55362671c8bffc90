//! The visitor record type and its derived time fields.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// One parsed row of the visitor tracking sheet.
///
/// Every record in a working set has a valid `timestamp`; rows whose
/// timestamp did not parse are discarded at load time. The derived fields
/// (`date`, `hour`, `weekday`, `week`) are pure functions of `timestamp`,
/// computed once when the record is built and never independently mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorRecord {
    /// Visit time. Required; the only field guaranteed to be present.
    pub timestamp: NaiveDateTime,
    /// Visitor identifier as recorded by the tracker. Not validated as a real IP.
    pub ip: String,
    /// Country, when the source carries the column and the cell is non-empty.
    pub country: Option<String>,
    /// Region, same presence rules as `country`.
    pub region: Option<String>,
    /// City, same presence rules as `country`.
    pub city: Option<String>,
    /// ISP, same presence rules as `country`.
    pub isp: Option<String>,
    /// Device category, same presence rules as `country`.
    pub device: Option<String>,
    /// Browser, same presence rules as `country`.
    pub browser: Option<String>,
    /// Latitude; `None` when the cell was absent or non-numeric.
    pub lat: Option<f64>,
    /// Longitude; `None` when the cell was absent or non-numeric.
    pub lon: Option<f64>,
    /// Calendar date of `timestamp`.
    pub date: NaiveDate,
    /// Hour of day of `timestamp`, 0-23.
    pub hour: u32,
    /// Weekday of `timestamp`.
    pub weekday: Weekday,
    /// ISO week number of `timestamp`, 1-53.
    pub week: u32,
}

/// Field values of a record as they appear in the source columns.
///
/// Groups the optional inputs to [`VisitorRecord::new`] so the constructor
/// does not take ten positional arguments.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    /// Visitor identifier.
    pub ip: String,
    /// Country cell, if present and non-empty.
    pub country: Option<String>,
    /// Region cell, if present and non-empty.
    pub region: Option<String>,
    /// City cell, if present and non-empty.
    pub city: Option<String>,
    /// ISP cell, if present and non-empty.
    pub isp: Option<String>,
    /// Device cell, if present and non-empty.
    pub device: Option<String>,
    /// Browser cell, if present and non-empty.
    pub browser: Option<String>,
    /// Parsed latitude, if present and numeric.
    pub lat: Option<f64>,
    /// Parsed longitude, if present and numeric.
    pub lon: Option<f64>,
}

impl VisitorRecord {
    /// Builds a record from a parsed timestamp and its source fields,
    /// computing the derived time fields.
    pub fn new(timestamp: NaiveDateTime, fields: RecordFields) -> Self {
        VisitorRecord {
            date: timestamp.date(),
            hour: timestamp.hour(),
            weekday: timestamp.weekday(),
            week: timestamp.iso_week().week(),
            timestamp,
            ip: fields.ip,
            country: fields.country,
            region: fields.region,
            city: fields.city,
            isp: fields.isp,
            device: fields.device,
            browser: fields.browser,
            lat: fields.lat,
            lon: fields.lon,
        }
    }

    /// Full weekday name of the visit ("Monday" .. "Sunday").
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    /// Whether any field of this row, in string form, contains `needle_lower`.
    ///
    /// `needle_lower` must already be lowercase; the comparison is
    /// case-insensitive on the row side. An empty needle matches every row.
    pub fn matches_term(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        self.field_strings()
            .iter()
            .any(|value| value.to_lowercase().contains(needle_lower))
    }

    /// String form of every field of the row, raw and derived.
    fn field_strings(&self) -> Vec<String> {
        let mut values = vec![
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.ip.clone(),
            self.date.to_string(),
            self.hour.to_string(),
            self.day_name().to_string(),
            self.week.to_string(),
        ];
        for field in [
            &self.country,
            &self.region,
            &self.city,
            &self.isp,
            &self.device,
            &self.browser,
        ] {
            if let Some(value) = field {
                values.push(value.clone());
            }
        }
        if let Some(lat) = self.lat {
            values.push(lat.to_string());
        }
        if let Some(lon) = self.lon {
            values.push(lon.to_string());
        }
        values
    }
}

/// Full English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
