//! Individual filter predicates.

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::model::VisitorRecord;

/// Time-of-day bucket a visit hour can fall into.
///
/// `AllDay` is the sentinel meaning "no constraint".
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeBucket {
    /// No time-of-day constraint.
    AllDay,
    /// Hours 6-11.
    Morning,
    /// Hours 12-17.
    Afternoon,
    /// Hours 18-23.
    Evening,
    /// Hours 0-5.
    Night,
}

impl TimeBucket {
    /// Whether `hour` (0-23) falls inside this bucket.
    pub fn contains(&self, hour: u32) -> bool {
        match self {
            TimeBucket::AllDay => true,
            TimeBucket::Morning => (6..=11).contains(&hour),
            TimeBucket::Afternoon => (12..=17).contains(&hour),
            TimeBucket::Evening => (18..=23).contains(&hour),
            TimeBucket::Night => hour <= 5,
        }
    }
}

/// One filter condition over a visitor record.
///
/// Predicates in a set are combined with logical AND. Each predicate is a
/// pure check with no side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Inclusive range on the derived calendar date; open ends are unconstrained.
    DateRange {
        /// Earliest date kept, if constrained.
        start: Option<NaiveDate>,
        /// Latest date kept, if constrained.
        end: Option<NaiveDate>,
    },
    /// Exact match on the country field.
    Country(String),
    /// Exact match on the device field.
    Device(String),
    /// Exact match on the browser field.
    Browser(String),
    /// Membership in a time-of-day bucket.
    TimeBucket(TimeBucket),
    /// Case-insensitive substring match against every field of the row.
    ///
    /// The stored needle is lowercase. A row matches if ANY field contains it.
    Search(String),
}

impl Predicate {
    /// Builds a search predicate, lowercasing the term once up front.
    pub fn search(term: &str) -> Self {
        Predicate::Search(term.to_lowercase())
    }

    /// Whether `record` satisfies this predicate.
    pub fn matches(&self, record: &VisitorRecord) -> bool {
        match self {
            Predicate::DateRange { start, end } => {
                start.map_or(true, |s| record.date >= s) && end.map_or(true, |e| record.date <= e)
            }
            Predicate::Country(value) => record.country.as_deref() == Some(value.as_str()),
            Predicate::Device(value) => record.device.as_deref() == Some(value.as_str()),
            Predicate::Browser(value) => record.browser.as_deref() == Some(value.as_str()),
            Predicate::TimeBucket(bucket) => bucket.contains(record.hour),
            Predicate::Search(needle) => record.matches_term(needle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bucket_boundaries() {
        assert!(TimeBucket::Night.contains(0));
        assert!(TimeBucket::Night.contains(5));
        assert!(!TimeBucket::Night.contains(6));
        assert!(TimeBucket::Morning.contains(6));
        assert!(TimeBucket::Morning.contains(11));
        assert!(TimeBucket::Afternoon.contains(12));
        assert!(TimeBucket::Afternoon.contains(17));
        assert!(TimeBucket::Evening.contains(18));
        assert!(TimeBucket::Evening.contains(23));
        for hour in 0..24 {
            assert!(TimeBucket::AllDay.contains(hour));
        }
    }

    #[test]
    fn test_every_hour_falls_in_exactly_one_bucket() {
        let buckets = [
            TimeBucket::Morning,
            TimeBucket::Afternoon,
            TimeBucket::Evening,
            TimeBucket::Night,
        ];
        for hour in 0..24 {
            let hits = buckets.iter().filter(|b| b.contains(hour)).count();
            assert_eq!(hits, 1, "hour {} should fall in exactly one bucket", hour);
        }
    }
}
