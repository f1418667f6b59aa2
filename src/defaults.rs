//! Default Configuration Values
//!
//! Centralizes the defaults used by the client and its configuration loader.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("common-net/", env!("CARGO_PKG_VERSION"));
}

/// Upload defaults
pub mod upload {
    /// Multipart field name used for each uploaded file
    pub const FIELD_NAME: &str = "file";

    /// Content type used when neither bytes nor extension identify the file
    pub const FALLBACK_MIME: &str = "application/octet-stream";
}

/// Environment variables read by [`crate::config::NetConfig::from_env`].
pub mod env {
    pub const BASE_URL: &str = "COMMON_NET_BASE_URL";
    pub const TIMEOUT_SECS: &str = "COMMON_NET_TIMEOUT_SECS";
    pub const CONNECT_TIMEOUT_SECS: &str = "COMMON_NET_CONNECT_TIMEOUT_SECS";
    pub const USER_AGENT: &str = "COMMON_NET_USER_AGENT";
    pub const PROXY: &str = "COMMON_NET_PROXY";
    pub const AUTH_TOKEN: &str = "COMMON_NET_AUTH_TOKEN";
    pub const LOG_RAW_PARAMS: &str = "COMMON_NET_LOG_RAW_PARAMS";
}

/// Tracing target for request diagnostics.
pub const HTTP_LOG_TARGET: &str = "common_net::http";
