//! Successful response wrapper.

use crate::error::NetError;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// A completed request with a success status.
#[derive(Debug, Clone)]
pub struct NetResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Fully resolved URL the request was sent to (without query string)
    pub url: String,
}

impl NetResponse {
    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| NetError::ParseError(format!("invalid JSON response: {e}")))
    }

    pub fn json_value(&self) -> Result<serde_json::Value, NetError> {
        self.json()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}
