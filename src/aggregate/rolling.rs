//! Rolling trend over date-ordered daily counts.

use chrono::NaiveDate;

use crate::config::{MIN_TREND_DATES, ROLLING_WINDOW};
use crate::model::VisitorRecord;

use super::daily_counts;

/// One point of the trend view.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Calendar date of the bucket.
    pub date: NaiveDate,
    /// Rows on that date.
    pub count: usize,
    /// Centered rolling mean, absent where the window is incomplete.
    pub rolling: Option<f64>,
}

/// Result of requesting the rolling trend.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendOutcome {
    /// One point per distinct date, chronological.
    Series(Vec<TrendPoint>),
    /// Too few distinct dates; the trend was skipped, not failed.
    InsufficientData {
        /// Number of distinct dates that were available.
        distinct_dates: usize,
    },
}

/// Computes the trend view over the daily counts of `records`.
///
/// Uses a centered moving mean with a window of [`ROLLING_WINDOW`] (or the
/// number of dates, if shorter). Fewer than [`MIN_TREND_DATES`] distinct
/// dates yields [`TrendOutcome::InsufficientData`].
pub fn trend(records: &[&VisitorRecord]) -> TrendOutcome {
    let daily = daily_counts(records);
    if daily.len() < MIN_TREND_DATES {
        return TrendOutcome::InsufficientData {
            distinct_dates: daily.len(),
        };
    }
    let counts: Vec<usize> = daily.iter().map(|(_, count)| *count).collect();
    let window = ROLLING_WINDOW.min(counts.len());
    let means = centered_rolling_mean(&counts, window);
    TrendOutcome::Series(
        daily
            .into_iter()
            .zip(means)
            .map(|((date, count), rolling)| TrendPoint {
                date,
                count,
                rolling,
            })
            .collect(),
    )
}

/// Centered moving mean over `values` with the given window width.
///
/// The output has one entry per input value. Positions whose centered
/// window would run off either end are `None`; for even windows the extra
/// slot trails the center.
pub fn centered_rolling_mean(values: &[usize], window: usize) -> Vec<Option<f64>> {
    let len = values.len();
    if len == 0 || window == 0 {
        return vec![None; len];
    }
    let window = window.min(len);
    let left = (window - 1) / 2;
    let right = window / 2;
    (0..len)
        .map(|i| {
            if i < left || i + right >= len {
                None
            } else {
                let sum: usize = values[i - left..=i + right].iter().sum();
                Some(sum as f64 / window as f64)
            }
        })
        .collect()
}
