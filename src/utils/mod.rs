//! Utility modules

pub mod cancel;
pub mod mime;

pub use cancel::{TagGuard, TagRegistry};
