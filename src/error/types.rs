//! Core error types.

use thiserror::Error;

/// Coarse error classification used for logging and caller decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    RateLimit,
    Client,
    Server,
    Parsing,
    Validation,
    Configuration,
    Io,
    Cancelled,
}

/// Error returned by every request, upload and configuration call.
#[derive(Debug, Clone, Error)]
pub enum NetError {
    /// Transport-level failure reported by the HTTP client.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The server answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// 401 or 403.
    #[error("Authentication error {code}: {message}")]
    AuthenticationError { code: u16, message: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timed out: {0}")]
    TimeoutError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(String),

    /// The request's tag was cancelled while it was in flight.
    #[error("Request cancelled (tag: {tag})")]
    Cancelled { tag: String },
}

impl NetError {
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code associated with the error, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::AuthenticationError { code, .. } => Some(*code),
            Self::NotFound(_) => Some(404),
            Self::RateLimitError(_) => Some(429),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::TimeoutError(_) | Self::ConnectionError(_) => {
                ErrorCategory::Network
            }
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } | Self::NotFound(_) => ErrorCategory::Client,
            Self::AuthenticationError { .. } => ErrorCategory::Authentication,
            Self::RateLimitError(_) => ErrorCategory::RateLimit,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::InvalidParameter(_) => ErrorCategory::Validation,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::Io,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }

    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Informational only: the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Server | ErrorCategory::RateLimit
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_status() {
        assert_eq!(NetError::api_error(503, "x").category(), ErrorCategory::Server);
        assert_eq!(NetError::api_error(422, "x").category(), ErrorCategory::Client);
        assert_eq!(
            NetError::RateLimitError("slow down".into()).category(),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            NetError::Cancelled { tag: "t".into() }.category(),
            ErrorCategory::Cancelled
        );
    }

    #[test]
    fn retryable_only_for_transient_failures() {
        assert!(NetError::api_error(500, "x").is_retryable());
        assert!(NetError::TimeoutError("t".into()).is_retryable());
        assert!(!NetError::api_error(400, "x").is_retryable());
        assert!(!NetError::InvalidParameter("url".into()).is_retryable());
        assert!(!NetError::Cancelled { tag: "t".into() }.is_retryable());
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(NetError::api_error(418, "teapot").status_code(), Some(418));
        assert_eq!(NetError::NotFound("/x".into()).status_code(), Some(404));
        assert_eq!(NetError::HttpError("reset".into()).status_code(), None);
        let forbidden = NetError::AuthenticationError {
            code: 403,
            message: "no access".into(),
        };
        assert_eq!(forbidden.status_code(), Some(403));
        assert_eq!(forbidden.category(), ErrorCategory::Authentication);
    }
}
