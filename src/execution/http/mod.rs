//! HTTP plumbing shared by every request kind.

pub mod client;
pub mod errors;
pub mod interceptor;

pub use client::build_http_client_from_config;
pub use errors::classify_http_error;
pub use interceptor::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
