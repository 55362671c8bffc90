//! The loader: fetch, parse, and cache the visitor record set.

mod cache;
mod fetch;
mod parse;

pub use cache::SheetCache;
pub use fetch::fetch_csv;
pub use parse::{normalize_headers, parse_records, parse_timestamp};

use std::sync::Arc;

use log::{debug, info, warn};

use crate::error_handling::{LoadError, LoadStats};
use crate::model::RecordSet;

/// Loads the record set for `url`, honoring the cache.
///
/// Callers within the TTL window receive the cached set without a refetch.
/// On a cache miss the source is fetched and parsed; a fresh set replaces
/// the cached one atomically. When the refresh fails and a last good set
/// exists, that set keeps being served (stale) and the failure is logged;
/// the error only surfaces when there is nothing to fall back to.
pub async fn load(
    client: &reqwest::Client,
    cache: &SheetCache,
    stats: &LoadStats,
    url: &str,
) -> Result<Arc<RecordSet>, LoadError> {
    if let Some(cached) = cache.fresh(url) {
        debug!("serving {} cached visitor rows for {}", cached.len(), url);
        return Ok(cached);
    }

    let loaded = match fetch_csv(client, url).await {
        Ok(body) => parse_records(&body, url, stats),
        Err(e) => Err(e),
    };

    match loaded {
        Ok(set) => {
            info!("loaded {} visitor rows from {}", set.len(), url);
            let set = Arc::new(set);
            cache.store(url, Arc::clone(&set));
            Ok(set)
        }
        Err(e) => {
            if let Some(stale) = cache.last_good(url) {
                warn!(
                    "refresh failed ({}); serving last good set of {} rows",
                    e,
                    stale.len()
                );
                Ok(stale)
            } else {
                Err(e)
            }
        }
    }
}
