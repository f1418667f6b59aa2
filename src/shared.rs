//! Process-wide client accessor.
//!
//! Prefer passing an [`HttpClient`] (or `Arc<dyn Requester>`) to the code that
//! needs it. This module exists for call sites that cannot be threaded through:
//! the first successful [`create`] builds the client, later calls return the
//! same instance and ignore their configuration.

use crate::client::HttpClient;
use crate::config::NetConfig;
use crate::error::NetError;
use once_cell::sync::OnceCell;

static SHARED: OnceCell<HttpClient> = OnceCell::new();

/// Build the shared client on first use and return it.
///
/// Concurrent first calls build at most one client. A failed build leaves the
/// slot empty so a later call can retry with another configuration.
pub fn create(config: NetConfig) -> Result<&'static HttpClient, NetError> {
    SHARED.get_or_try_init(|| HttpClient::new(config))
}

/// Like [`create`], loading the configuration from the environment only if
/// the client does not exist yet.
pub fn create_from_env() -> Result<&'static HttpClient, NetError> {
    SHARED.get_or_try_init(|| HttpClient::new(NetConfig::from_env()?))
}

/// The shared client, if it has been created.
pub fn get() -> Option<&'static HttpClient> {
    SHARED.get()
}

/// Install an already built client. Returns it back if one is already set.
pub fn install(client: HttpClient) -> Result<&'static HttpClient, HttpClient> {
    SHARED.try_insert(client).map_err(|(_, client)| client)
}
