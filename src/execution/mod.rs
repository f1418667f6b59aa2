//! Request execution: transport construction, interceptors and status
//! classification.

pub mod http;
