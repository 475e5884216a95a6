//! Forwards raw image bytes to the upstream classifier and relays its JSON
//! response.

use axum::body::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use crate::config::Config;
use crate::error::RelayError;

/// POST the image bytes to the configured upstream endpoint and return the
/// parsed JSON body. One call, no retries; the upstream status decides
/// between relaying the body and relaying an error.
pub async fn forward(
    http: &reqwest::Client,
    config: &Config,
    image: Bytes,
) -> Result<serde_json::Value, RelayError> {
    tracing::info!(bytes = image.len(), "forwarding image to upstream classifier");

    let mut request = http
        .post(&config.upstream_url)
        .header(CONTENT_TYPE, "application/octet-stream")
        .header(CONTENT_LENGTH, image.len());
    if let Some(token) = &config.hf_token {
        request = request.bearer_auth(token);
    }

    let response = request
        .body(image)
        .send()
        .await
        .map_err(|err| RelayError::Connection(err.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| RelayError::Connection(err.to_string()))?;

    let json: serde_json::Value =
        serde_json::from_str(&body).map_err(|_| RelayError::UpstreamUnparseable)?;

    if status.is_success() {
        tracing::info!("upstream classification succeeded");
        Ok(json)
    } else {
        Err(RelayError::Upstream {
            status: status.as_u16(),
            body: json,
        })
    }
}
