//! Optional upstream clear collaborator.
//!
//! Clearing local state never guarantees mutation of the upstream source;
//! actual deletion happens only through a configured callback endpoint.

use anyhow::{bail, Context, Result};
use log::info;

/// Asks the configured endpoint to delete the upstream source data.
///
/// With no endpoint configured the request is skipped and `Ok(false)` is
/// returned; the local cache invalidation still happened on the caller's
/// side. Returns `Ok(true)` when the endpoint accepted the request.
pub async fn clear_upstream(client: &reqwest::Client, endpoint: Option<&str>) -> Result<bool> {
    let Some(endpoint) = endpoint else {
        info!("no clear endpoint configured; upstream data left untouched");
        return Ok(false);
    };

    let response = client
        .post(endpoint)
        .send()
        .await
        .context("clear endpoint unreachable")?;
    let status = response.status();
    if status.is_success() {
        info!("upstream clear accepted by {}", endpoint);
        Ok(true)
    } else {
        bail!(
            "clear endpoint {} returned HTTP {}",
            endpoint,
            status.as_u16()
        );
    }
}
