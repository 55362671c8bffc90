//! Source fetching over HTTP(S).

use log::debug;

use crate::error_handling::LoadError;

/// Fetches the raw CSV body from `url`.
///
/// A non-success status and an empty body are both load failures; the
/// caller decides whether a previously cached set papers over them.
pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    debug!("fetching visitor data from {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Err(LoadError::EmptyBody {
            url: url.to_string(),
        });
    }
    Ok(body)
}
