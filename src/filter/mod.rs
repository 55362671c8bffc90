//! The filter stage: AND-combined predicates over a record set.
//!
//! Filtering never mutates the loaded set; applying a filter set produces a
//! new view of references into it, recomputed per interaction and discarded
//! after use.

mod predicate;

pub use predicate::{Predicate, TimeBucket};

use crate::config::Config;
use crate::model::VisitorRecord;

/// Sentinel categorical value meaning "no constraint".
fn is_all(value: &str) -> bool {
    value.eq_ignore_ascii_case("all")
}

/// A set of predicates applied together with logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    /// Creates an empty filter set (matches everything).
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Adds a predicate to the set.
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Number of predicates in the set.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the set holds no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Builds the filter set selected by the CLI options.
    ///
    /// The "All" sentinel on categorical options and the `AllDay` time
    /// bucket contribute no predicate.
    pub fn from_config(config: &Config) -> Self {
        let mut filters = FilterSet::new();
        if config.from.is_some() || config.to.is_some() {
            filters.push(Predicate::DateRange {
                start: config.from,
                end: config.to,
            });
        }
        if let Some(country) = &config.country {
            if !is_all(country) {
                filters.push(Predicate::Country(country.clone()));
            }
        }
        if let Some(device) = &config.device {
            if !is_all(device) {
                filters.push(Predicate::Device(device.clone()));
            }
        }
        if let Some(browser) = &config.browser {
            if !is_all(browser) {
                filters.push(Predicate::Browser(browser.clone()));
            }
        }
        if config.time_bucket != TimeBucket::AllDay {
            filters.push(Predicate::TimeBucket(config.time_bucket));
        }
        if let Some(term) = &config.search {
            if !term.is_empty() {
                filters.push(Predicate::search(term));
            }
        }
        filters
    }

    /// Applies every predicate to `records`, keeping rows that satisfy all.
    ///
    /// Pure: the input is not mutated, and an empty input yields an empty
    /// view without error.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a VisitorRecord>
    where
        I: IntoIterator<Item = &'a VisitorRecord>,
    {
        records
            .into_iter()
            .filter(|record| self.predicates.iter().all(|p| p.matches(record)))
            .collect()
    }
}
