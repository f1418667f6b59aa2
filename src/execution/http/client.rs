//! HTTP client builder utilities
//!
//! Builds the single `reqwest::Client` owned by [`crate::HttpClient`].

use crate::error::NetError;
use crate::types::HttpConfig;

/// Build an HTTP client from `HttpConfig`.
///
/// `extra_headers` are merged over `config.headers` and sent with every
/// request (the bearer token is passed this way).
pub fn build_http_client_from_config(
    config: &HttpConfig,
    extra_headers: &[(&str, String)],
) -> Result<reqwest::Client, NetError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| NetError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    let mut headers = reqwest::header::HeaderMap::new();
    let configured = config.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let extra = extra_headers.iter().map(|(k, v)| (*k, v.as_str()));
    for (k, v) in configured.chain(extra) {
        let name = reqwest::header::HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
            NetError::ConfigurationError(format!("Invalid header name '{k}': {e}"))
        })?;
        let mut value = reqwest::header::HeaderValue::from_str(v).map_err(|e| {
            NetError::ConfigurationError(format!("Invalid header value for '{k}': {e}"))
        })?;
        if name == reqwest::header::AUTHORIZATION {
            value.set_sensitive(true);
        }
        headers.insert(name, value);
    }
    if !headers.is_empty() {
        builder = builder.default_headers(headers);
    }

    builder
        .build()
        .map_err(|e| NetError::HttpError(format!("Failed to create HTTP client: {e}")))
}
