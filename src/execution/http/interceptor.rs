//! HTTP Interceptor interfaces
//!
//! Interceptors observe every request the client sends. They can add headers
//! to the request builder before send, observe successful responses and be
//! notified of errors. Hooks run inline on the request task and should stay
//! cheap.

use crate::defaults::HTTP_LOG_TARGET;
use crate::error::NetError;
use crate::types::{RequestKind, Tag};

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub request_id: String,
    pub kind: RequestKind,
    /// Fully resolved URL
    pub url: String,
    pub tag: Option<Tag>,
    /// True for multipart uploads
    pub upload: bool,
}

impl HttpRequestContext {
    pub fn new(kind: RequestKind, url: impl Into<String>, tag: Option<Tag>) -> Self {
        Self {
            request_id: generate_request_id(),
            kind,
            url: url.into(),
            tag,
            upload: false,
        }
    }

    pub fn for_upload(url: impl Into<String>, tag: Option<Tag>) -> Self {
        Self {
            upload: true,
            ..Self::new(RequestKind::Post, url, tag)
        }
    }

    pub(crate) fn tag_str(&self) -> &str {
        self.tag.as_ref().map(Tag::as_str).unwrap_or("-")
    }
}

pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Return the (possibly modified)
    /// builder or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, NetError> {
        Ok(builder)
    }

    /// Called after a response with a success status is received.
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), NetError> {
        Ok(())
    }

    /// Called when sending fails, the status is not a success, or the
    /// request is cancelled.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &NetError) {}
}

/// A logging interceptor backed by `tracing` (no parameter values).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, NetError> {
        tracing::debug!(target: HTTP_LOG_TARGET, request_id=%ctx.request_id, kind=%ctx.kind, url=%ctx.url, tag=%ctx.tag_str(), upload=ctx.upload, "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), NetError> {
        tracing::debug!(target: HTTP_LOG_TARGET, request_id=%ctx.request_id, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &NetError) {
        tracing::warn!(target: HTTP_LOG_TARGET, request_id=%ctx.request_id, url=%ctx.url, tag=%ctx.tag_str(), err=%error, "request error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_context_is_a_post() {
        let ctx = HttpRequestContext::for_upload("http://h/upload", Some(Tag::new("t")));
        assert!(ctx.upload);
        assert_eq!(ctx.kind, RequestKind::Post);
        assert_eq!(ctx.tag_str(), "t");
    }

    #[test]
    fn request_ids_are_unique() {
        let a = HttpRequestContext::new(RequestKind::Get, "u", None);
        let b = HttpRequestContext::new(RequestKind::Get, "u", None);
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.tag_str(), "-");
    }

    #[test]
    #[tracing_test::traced_test]
    fn logging_interceptor_uses_http_target() {
        let ctx =
            HttpRequestContext::new(RequestKind::Json, "http://h/orders", Some(Tag::new("cart")));
        LoggingInterceptor.on_error(&ctx, &NetError::api_error(500, "boom"));
        assert!(logs_contain(HTTP_LOG_TARGET));
        assert!(logs_contain("request error"));
        assert!(logs_contain("http://h/orders"));
    }
}
