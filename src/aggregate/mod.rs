//! The aggregation stage: grouped counts and the rolling trend.

mod rolling;

pub use rolling::{centered_rolling_mean, trend, TrendOutcome, TrendPoint};

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Weekday};
use clap::ValueEnum;

use crate::config::{TOP_N_DEVICE, TOP_N_GEO};
use crate::model::{weekday_name, VisitorRecord};

/// Grouping key for the aggregation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupKey {
    /// One bucket per calendar date present, ordered chronologically.
    Date,
    /// One bucket per hour of day present, 0-23.
    Hour,
    /// One bucket per ISO week number present.
    Week,
    /// Fixed Monday..Sunday buckets; zero-count handling per [`DayNamePolicy`].
    DayName,
    /// Top countries by count.
    Country,
    /// Top regions by count.
    Region,
    /// Top cities by count.
    City,
    /// Top ISPs by count.
    Isp,
    /// Top device categories by count.
    Device,
    /// Top browsers by count.
    Browser,
}

impl GroupKey {
    /// Short lowercase name of the key, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Date => "date",
            GroupKey::Hour => "hour",
            GroupKey::Week => "week",
            GroupKey::DayName => "day-name",
            GroupKey::Country => "country",
            GroupKey::Region => "region",
            GroupKey::City => "city",
            GroupKey::Isp => "isp",
            GroupKey::Device => "device",
            GroupKey::Browser => "browser",
        }
    }

    /// Truncation applied after sorting, for categorical keys only.
    fn top_n(self) -> Option<usize> {
        match self {
            GroupKey::Country | GroupKey::Region | GroupKey::City | GroupKey::Isp => {
                Some(TOP_N_GEO)
            }
            GroupKey::Device | GroupKey::Browser => Some(TOP_N_DEVICE),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How day-name buckets with zero matching rows are reported.
///
/// The reference behavior was inconsistent between variants; the policy is
/// explicit here and selectable per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayNamePolicy {
    /// Every weekday appears, absent days with count 0 (default).
    ZeroFill,
    /// Only weekdays with at least one row appear.
    Omit,
}

/// One group produced by an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Group key value, rendered for presentation.
    pub label: String,
    /// Number of rows in the group.
    pub count: usize,
}

impl Bucket {
    fn new(label: impl Into<String>, count: usize) -> Self {
        Bucket {
            label: label.into(),
            count,
        }
    }
}

/// Counts rows per group and returns the buckets in the key's defined order.
///
/// Time-based keys are ordered by their natural axis with no gap-filling
/// (except day names, which follow `policy` on a fixed Monday..Sunday axis).
/// Categorical keys are ordered by descending count, ties broken by
/// first-encountered order, then truncated to the key's top-N. Rows lacking
/// the grouped field are not counted. An empty input yields no buckets.
pub fn aggregate(records: &[&VisitorRecord], key: GroupKey, policy: DayNamePolicy) -> Vec<Bucket> {
    match key {
        GroupKey::Date => daily_counts(records)
            .into_iter()
            .map(|(date, count)| Bucket::new(date.to_string(), count))
            .collect(),
        GroupKey::Hour => {
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for record in records {
                *counts.entry(record.hour).or_insert(0) += 1;
            }
            counts
                .into_iter()
                .map(|(hour, count)| Bucket::new(format!("{:02}:00", hour), count))
                .collect()
        }
        GroupKey::Week => {
            // Buckets are keyed by ISO week number only; the same number from
            // different years lands in one bucket.
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for record in records {
                *counts.entry(record.week).or_insert(0) += 1;
            }
            counts
                .into_iter()
                .map(|(week, count)| Bucket::new(format!("W{:02}", week), count))
                .collect()
        }
        GroupKey::DayName => day_name_counts(records, policy),
        categorical => categorical_counts(
            records,
            |record| categorical_field(record, categorical),
            categorical.top_n(),
        ),
    }
}

/// The categorical field a key groups on, absent for time-based keys.
fn categorical_field(record: &VisitorRecord, key: GroupKey) -> Option<&str> {
    match key {
        GroupKey::Country => record.country.as_deref(),
        GroupKey::Region => record.region.as_deref(),
        GroupKey::City => record.city.as_deref(),
        GroupKey::Isp => record.isp.as_deref(),
        GroupKey::Device => record.device.as_deref(),
        GroupKey::Browser => record.browser.as_deref(),
        _ => None,
    }
}

/// Rows per calendar date, ordered chronologically, no gap-filling.
pub fn daily_counts(records: &[&VisitorRecord]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.date).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Day-name buckets in canonical Monday..Sunday order.
fn day_name_counts(records: &[&VisitorRecord], policy: DayNamePolicy) -> Vec<Bucket> {
    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let mut counts = [0usize; 7];
    for record in records {
        counts[record.weekday.num_days_from_monday() as usize] += 1;
    }
    WEEKDAYS
        .iter()
        .map(|weekday| {
            Bucket::new(
                weekday_name(*weekday),
                counts[weekday.num_days_from_monday() as usize],
            )
        })
        .filter(|bucket| match policy {
            DayNamePolicy::ZeroFill => true,
            DayNamePolicy::Omit => bucket.count > 0,
        })
        .collect()
}

/// Counts a categorical field: descending by count, ties broken by
/// first-encountered order, truncated to `top_n` after sorting.
fn categorical_counts<'a, F>(
    records: &[&'a VisitorRecord],
    field: F,
    top_n: Option<usize>,
) -> Vec<Bucket>
where
    F: Fn(&'a VisitorRecord) -> Option<&'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        if let Some(value) = field(record) {
            let entry = counts.entry(value).or_insert((0, index));
            entry.0 += 1;
        }
    }
    let mut buckets: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first_seen))| (value, count, first_seen))
        .collect();
    buckets.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    if let Some(n) = top_n {
        buckets.truncate(n);
    }
    buckets
        .into_iter()
        .map(|(value, count, _)| Bucket::new(value, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordFields;

    fn record(ts: &str, country: Option<&str>, device: Option<&str>) -> VisitorRecord {
        VisitorRecord::new(
            chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").expect("timestamp"),
            RecordFields {
                ip: "198.51.100.1".into(),
                country: country.map(str::to_string),
                device: device.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_date_buckets_chronological_no_gap_fill() {
        let rows = vec![
            record("2024-01-05 10:00:00", None, None),
            record("2024-01-01 10:00:00", None, None),
            record("2024-01-05 14:00:00", None, None),
        ];
        let refs: Vec<&VisitorRecord> = rows.iter().collect();
        let buckets = aggregate(&refs, GroupKey::Date, DayNamePolicy::ZeroFill);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "2024-01-01");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].label, "2024-01-05");
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn test_categorical_order_and_tiebreak() {
        // FR and DE tie at 1; FR was seen first and must come first.
        let rows = vec![
            record("2024-01-01 10:00:00", Some("FR"), None),
            record("2024-01-01 11:00:00", Some("US"), None),
            record("2024-01-01 12:00:00", Some("DE"), None),
            record("2024-01-01 13:00:00", Some("US"), None),
        ];
        let refs: Vec<&VisitorRecord> = rows.iter().collect();
        let buckets = aggregate(&refs, GroupKey::Country, DayNamePolicy::ZeroFill);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["US", "FR", "DE"]);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_categorical_top_n_truncation() {
        let mut rows = Vec::new();
        for i in 0..12 {
            let name = format!("Device{}", i);
            rows.push(record("2024-01-01 10:00:00", None, Some(name.as_str())));
        }
        let refs: Vec<&VisitorRecord> = rows.iter().collect();
        let buckets = aggregate(&refs, GroupKey::Device, DayNamePolicy::ZeroFill);
        assert_eq!(buckets.len(), TOP_N_DEVICE);
    }

    #[test]
    fn test_rows_without_field_are_not_counted() {
        let rows = vec![
            record("2024-01-01 10:00:00", Some("US"), None),
            record("2024-01-01 11:00:00", None, None),
        ];
        let refs: Vec<&VisitorRecord> = rows.iter().collect();
        let buckets = aggregate(&refs, GroupKey::Country, DayNamePolicy::ZeroFill);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn test_day_name_zero_fill_vs_omit() {
        // A Monday and a Wednesday.
        let rows = vec![
            record("2024-01-01 10:00:00", None, None),
            record("2024-01-03 10:00:00", None, None),
        ];
        let refs: Vec<&VisitorRecord> = rows.iter().collect();

        let filled = aggregate(&refs, GroupKey::DayName, DayNamePolicy::ZeroFill);
        assert_eq!(filled.len(), 7);
        assert_eq!(filled[0].label, "Monday");
        assert_eq!(filled[0].count, 1);
        assert_eq!(filled[6].label, "Sunday");
        assert_eq!(filled[6].count, 0);

        let omitted = aggregate(&refs, GroupKey::DayName, DayNamePolicy::Omit);
        let labels: Vec<&str> = omitted.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Monday", "Wednesday"]);
    }

    #[test]
    fn test_empty_input_yields_no_buckets() {
        let refs: Vec<&VisitorRecord> = Vec::new();
        assert!(aggregate(&refs, GroupKey::Date, DayNamePolicy::ZeroFill).is_empty());
        assert!(aggregate(&refs, GroupKey::Country, DayNamePolicy::ZeroFill).is_empty());
        let day_names = aggregate(&refs, GroupKey::DayName, DayNamePolicy::ZeroFill);
        assert_eq!(day_names.len(), 7);
        assert!(day_names.iter().all(|b| b.count == 0));
        assert!(aggregate(&refs, GroupKey::DayName, DayNamePolicy::Omit).is_empty());
    }

    #[test]
    fn test_hour_buckets_present_only() {
        let rows = vec![
            record("2024-01-01 23:00:00", None, None),
            record("2024-01-01 09:00:00", None, None),
            record("2024-01-02 09:30:00", None, None),
        ];
        let refs: Vec<&VisitorRecord> = rows.iter().collect();
        let buckets = aggregate(&refs, GroupKey::Hour, DayNamePolicy::ZeroFill);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["09:00", "23:00"]);
        assert_eq!(buckets[0].count, 2);
    }
}
