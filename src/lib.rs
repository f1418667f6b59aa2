//! # common-net
//!
//! A small request facade over `reqwest`. All requests go through one
//! [`HttpClient`] holding a fixed base URL:
//!
//! - **GET / POST / JSON**: [`HttpClient::get`], [`HttpClient::post`] and
//!   [`HttpClient::json`] take a bare path or a [`RequestOptions`] with
//!   parameters and an optional tag.
//! - **Uploads**: [`HttpClient::upload_file`] and [`HttpClient::upload_files`]
//!   send multipart/form-data.
//! - **Tags**: [`HttpClient::cancel`] aborts every in-flight request sharing a
//!   tag.
//! - **Logging**: each request emits one `debug` event on the
//!   `common_net::http` target with the resolved URL and the (masked)
//!   parameters.
//!
//! ```rust,no_run
//! use common_net::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), NetError> {
//!     let client = HttpClient::new(NetConfig::new("https://api.example.com/app"))?;
//!
//!     let banner = client.get("/home/banner").await?;
//!     println!("{}", banner.text());
//!
//!     let params = RequestParam::new().with("user", "wss").with("password", "secret");
//!     let login = client
//!         .post(RequestOptions::new("/user/login").params(params).tag("login"))
//!         .await?;
//!     let body: serde_json::Value = login.json()?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod observability;
pub mod shared;
pub mod traits;
pub mod types;
pub mod utils;

pub use client::{HttpClient, HttpClientBuilder, PendingRequest};
pub use config::{NetConfig, NetConfigBuilder};
pub use error::{ErrorCategory, NetError};
pub use traits::Requester;
pub use types::{
    HttpConfig, NetResponse, RequestKind, RequestOptions, RequestParam, Tag, UploadRequest,
};

pub mod prelude {
    pub use crate::client::{HttpClient, HttpClientBuilder, PendingRequest};
    pub use crate::config::NetConfig;
    pub use crate::error::NetError;
    pub use crate::traits::Requester;
    pub use crate::types::{
        NetResponse, RequestKind, RequestOptions, RequestParam, Tag, UploadRequest,
    };
}
