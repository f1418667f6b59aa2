//! Client configuration.
//!
//! A [`NetConfig`] carries the fixed base URL every request path is appended
//! to, the HTTP transport settings, an optional bearer token and the logging
//! redaction switch. It can be built in code, deserialized with `serde`, or
//! loaded from `COMMON_NET_*` environment variables.

use crate::defaults::env as env_keys;
use crate::error::NetError;
use crate::types::HttpConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetConfig {
    /// Prefix of every resolved URL
    pub base_url: String,
    #[serde(default)]
    pub http: HttpConfig,
    /// Sent as `Authorization: Bearer <token>` when present. Never
    /// (de)serialized; set it through the builder or the environment.
    #[serde(skip)]
    pub auth_token: Option<SecretString>,
    /// Mask sensitive parameter values in the request log line
    #[serde(default = "default_redact_params")]
    pub redact_params: bool,
}

fn default_redact_params() -> bool {
    true
}

impl NetConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HttpConfig::default(),
            auth_token: None,
            redact_params: true,
        }
    }

    pub fn builder(base_url: impl Into<String>) -> NetConfigBuilder {
        NetConfigBuilder::new(base_url)
    }

    /// Load from `COMMON_NET_*` environment variables.
    ///
    /// `COMMON_NET_BASE_URL` is required; everything else is optional.
    pub fn from_env() -> Result<Self, NetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, NetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(env_keys::BASE_URL).ok_or_else(|| {
            NetError::ConfigurationError(format!("{} is not set", env_keys::BASE_URL))
        })?;
        let mut builder = NetConfigBuilder::new(base_url);

        if let Some(secs) = lookup(env_keys::TIMEOUT_SECS) {
            builder = builder.timeout(parse_secs(env_keys::TIMEOUT_SECS, &secs)?);
        }
        if let Some(secs) = lookup(env_keys::CONNECT_TIMEOUT_SECS) {
            builder = builder.connect_timeout(parse_secs(env_keys::CONNECT_TIMEOUT_SECS, &secs)?);
        }
        if let Some(agent) = lookup(env_keys::USER_AGENT) {
            builder = builder.user_agent(agent);
        }
        if let Some(proxy) = lookup(env_keys::PROXY) {
            builder = builder.proxy(proxy);
        }
        if let Some(token) = lookup(env_keys::AUTH_TOKEN) {
            builder = builder.auth_token(token);
        }
        if let Some(raw) = lookup(env_keys::LOG_RAW_PARAMS) {
            builder = builder.redact_params(!is_truthy(&raw));
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), NetError> {
        if self.base_url.trim().is_empty() {
            return Err(NetError::ConfigurationError(
                "base URL must not be empty".to_string(),
            ));
        }
        let parsed = reqwest::Url::parse(&self.base_url).map_err(|e| {
            NetError::ConfigurationError(format!("invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetError::ConfigurationError(format!(
                "unsupported base URL scheme '{}'",
                parsed.scheme()
            )));
        }
        Ok(())
    }

    /// `Authorization` header value, if a token is configured.
    pub(crate) fn bearer_header(&self) -> Option<String> {
        self.auth_token
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, NetError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| NetError::ConfigurationError(format!("{key}: expected seconds, got '{raw}': {e}")))
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Builder for [`NetConfig`]
#[derive(Debug, Clone)]
pub struct NetConfigBuilder {
    base_url: String,
    http: crate::types::HttpConfigBuilder,
    auth_token: Option<SecretString>,
    redact_params: bool,
}

impl NetConfigBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HttpConfig::builder(),
            auth_token: None,
            redact_params: true,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.timeout(Some(timeout));
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.connect_timeout(Some(timeout));
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http = self.http.user_agent(Some(user_agent));
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http = self.http.proxy(Some(proxy));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http = self.http.header(key, value);
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(SecretString::from(token.into()));
        self
    }

    pub fn redact_params(mut self, redact: bool) -> Self {
        self.redact_params = redact;
        self
    }

    pub fn build(self) -> NetConfig {
        NetConfig {
            base_url: self.base_url,
            http: self.http.build(),
            auth_token: self.auth_token,
            redact_params: self.redact_params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_requires_base_url() {
        let err = NetConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, NetError::ConfigurationError(_)));
    }

    #[test]
    fn from_lookup_reads_all_keys() {
        let config = NetConfig::from_lookup(lookup(&[
            ("COMMON_NET_BASE_URL", "https://api.example.com/v1"),
            ("COMMON_NET_TIMEOUT_SECS", "12"),
            ("COMMON_NET_CONNECT_TIMEOUT_SECS", "3"),
            ("COMMON_NET_USER_AGENT", "demo/1.0"),
            ("COMMON_NET_AUTH_TOKEN", "s3cr3t"),
            ("COMMON_NET_LOG_RAW_PARAMS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.http.timeout, Some(Duration::from_secs(12)));
        assert_eq!(config.http.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.http.user_agent.as_deref(), Some("demo/1.0"));
        assert_eq!(config.bearer_header().as_deref(), Some("Bearer s3cr3t"));
        assert!(!config.redact_params);
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = NetConfig::from_lookup(lookup(&[
            ("COMMON_NET_BASE_URL", "https://api.example.com"),
            ("COMMON_NET_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("COMMON_NET_TIMEOUT_SECS"));
    }

    #[test]
    fn validate_rejects_relative_and_non_http_urls() {
        assert!(NetConfig::new("").validate().is_err());
        assert!(NetConfig::new("/api").validate().is_err());
        assert!(NetConfig::new("ftp://files.example.com").validate().is_err());
        assert!(NetConfig::new("http://10.0.2.2:8080/app/").validate().is_ok());
    }

    #[test]
    fn token_is_not_serialized() {
        let config = NetConfig::builder("https://api.example.com")
            .auth_token("s3cr3t")
            .build();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("s3cr3t"));
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }

    #[test]
    fn redaction_defaults_on_when_deserialized() {
        let config: NetConfig = serde_json::from_str(r#"{"base_url": "https://a.example"}"#).unwrap();
        assert!(config.redact_params);
        assert!(config.auth_token.is_none());
    }
}
