//! Shared HTTP response helpers for the task API client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`StoreError::Api`]) and body decoding so the
//! store stays focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`StoreError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`StoreError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(StoreError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(StoreError::Api {
            status: resp.status().as_u16(),
            message: error_message(resp.text().await.unwrap_or_default()),
        });
    }
    Ok(resp)
}

/// Decode a JSON body, reporting the offending payload on failure.
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, StoreError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Parse(format!("{e} in body: {body}")))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Prefer the API's `{"detail": "..."}` message over the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or(body)
}
