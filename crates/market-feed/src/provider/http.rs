//! Shared HTTP plumbing for the adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::errors::FeedError;
use crate::models::ProviderId;

/// Build the client an adapter owns. The timeout is what turns a slow
/// provider into [`FeedError::Timeout`].
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Trim a trailing slash so `{base}{path}` never doubles it.
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Send `request` and parse the body as JSON.
///
/// Transport failures and non-success statuses map to the transport
/// variants of [`FeedError`]; an unparseable body is `Malformed`.
pub(crate) async fn send_json(
    provider: ProviderId,
    request: RequestBuilder,
) -> Result<Value, FeedError> {
    let response = request
        .send()
        .await
        .map_err(|e| FeedError::from_reqwest(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        debug!("{} responded with HTTP {}", provider, status);
        return Err(FeedError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FeedError::from_reqwest(provider, e))?;

    serde_json::from_slice(&body)
        .map_err(|e| FeedError::malformed(provider, format!("invalid JSON: {}", e)))
}
