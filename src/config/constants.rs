//! Configuration constants.

/// Default time-to-live for the cached record set, in seconds.
///
/// The published sheet export is polled at most this often; callers inside
/// the window are served the cached set without a refetch.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent header value for source fetches.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; visitor-analytics/0.1)";

/// Default page size for the log table view.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of buckets kept when grouping by country, region, city, or ISP.
pub const TOP_N_GEO: usize = 10;

/// Number of buckets kept when grouping by device or browser.
pub const TOP_N_DEVICE: usize = 8;

/// Window width for the centered rolling mean over daily counts.
pub const ROLLING_WINDOW: usize = 7;

/// Minimum number of distinct dates for the rolling trend to be computed.
///
/// Below this the trend is skipped and reported as insufficient data.
pub const MIN_TREND_DATES: usize = 8;

/// Columns the source export is expected to carry, in canonical order.
///
/// Matching is case-insensitive and whitespace-trimmed. A subset being
/// absent degrades feature availability rather than failing the load,
/// except for [`REQUIRED_COLUMNS`].
pub const EXPECTED_COLUMNS: &[&str] = &[
    "timestamp", "ip", "country", "region", "city", "isp", "device", "browser", "lat", "lon",
];

/// Columns that must be present after header normalization.
pub const REQUIRED_COLUMNS: &[&str] = &["timestamp", "ip", "country"];

/// Derived columns appended to exports, in canonical order.
pub const DERIVED_COLUMNS: &[&str] = &["date", "hour", "day_name", "week"];
