//! Error Handling Module
//!
//! Every fallible operation in the crate returns [`NetError`]. A request
//! resolves to exactly one `Ok(NetResponse)` or one `Err(NetError)`.
//!
//! # Example
//!
//! ```rust,ignore
//! use common_net::error::{ErrorCategory, NetError};
//!
//! let error = NetError::api_error(500, "boom");
//! assert_eq!(error.category(), ErrorCategory::Server);
//! assert!(error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
