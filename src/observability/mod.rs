//! Logging setup and log-line redaction.

pub mod redact;
pub mod tracing;

pub use redact::{format_params_for_logging, is_sensitive_key, mask_sensitive_value, redact_params};
pub use self::tracing::{OutputFormat, TracingConfig, TracingConfigBuilder, init_tracing};
