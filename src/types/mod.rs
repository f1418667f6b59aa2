//! Request and response types.

pub mod http;
pub mod params;
pub mod request;
pub mod response;

pub use http::{HttpConfig, HttpConfigBuilder};
pub use params::RequestParam;
pub use request::{RequestKind, RequestOptions, Tag, UploadRequest};
pub use response::NetResponse;
