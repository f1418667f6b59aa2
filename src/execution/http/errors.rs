//! HTTP status classification.

use crate::error::NetError;
use reqwest::header::HeaderMap;

const REQUEST_ID_HEADERS: [&str; 4] = [
    "x-request-id",
    "x-trace-id",
    "traceparent",
    "x-correlation-id",
];

/// Map a non-success response to a [`NetError`].
///
/// 401/403 → `AuthenticationError`, 404 → `NotFound`, 429 → `RateLimitError`
/// (with the `Retry-After` hint when present); any other status becomes an
/// `ApiError` carrying the body text and, when the body is JSON, the parsed
/// body as `details`.
pub fn classify_http_error(
    url: &str,
    status: u16,
    body_text: &str,
    headers: &HeaderMap,
    fallback_message: Option<&str>,
) -> NetError {
    let request_ids: Vec<String> = REQUEST_ID_HEADERS
        .iter()
        .filter_map(|k| {
            headers
                .get(*k)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{k}={v}"))
        })
        .collect();
    let ids_suffix = if request_ids.is_empty() {
        String::new()
    } else {
        format!(" ids=[{}]", request_ids.join(","))
    };
    // Keep messages short.
    let body_sample = body_text.chars().take(200).collect::<String>();

    match status {
        429 => {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            NetError::RateLimitError(format!(
                "url={url} http=429 retry_after={retry_after}{ids_suffix} body_sample={body_sample}"
            ))
        }
        401 | 403 => NetError::AuthenticationError {
            code: status,
            message: format!("url={url} http={status}{ids_suffix} body_sample={body_sample}"),
        },
        404 => NetError::NotFound(format!(
            "url={url} http=404{ids_suffix} body_sample={body_sample}"
        )),
        _ => {
            let message = if body_text.trim().is_empty() {
                fallback_message.unwrap_or("request failed").to_string()
            } else {
                body_text.to_string()
            };
            NetError::ApiError {
                code: status,
                message,
                details: serde_json::from_str(body_text).ok(),
            }
        }
    }
}
