//! Request descriptions passed to the client.

use super::params::RequestParam;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which kind of call a request is dispatched as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// GET with parameters in the query string
    #[default]
    Get,
    /// POST with parameters as an urlencoded form
    Post,
    /// POST with parameters as a JSON object body
    Json,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Json => "json",
        }
    }

    pub fn http_method(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post | Self::Json => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque request group identifier.
///
/// All in-flight requests sharing a tag can be cancelled together with
/// [`crate::HttpClient::cancel`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Tag> for Tag {
    fn from(value: &Tag) -> Self {
        value.clone()
    }
}

/// Path, parameters and tag of one request.
///
/// `params` defaults to an empty bag and `tag` to `None`, so a bare path
/// converts directly:
///
/// ```rust,ignore
/// client.get("/user/info").await?;
/// client.get(RequestOptions::new("/user/info").params(params).tag("home")).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Path appended to the base URL
    pub url: String,
    #[serde(default)]
    pub params: RequestParam,
    #[serde(default)]
    pub tag: Option<Tag>,
}

impl RequestOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: RequestParam::default(),
            tag: None,
        }
    }

    pub fn params(mut self, params: RequestParam) -> Self {
        self.params = params;
        self
    }

    /// Add a single parameter.
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.params.put(key, value);
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn maybe_tag(mut self, tag: Option<Tag>) -> Self {
        self.tag = tag;
        self
    }
}

impl From<&str> for RequestOptions {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for RequestOptions {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

impl From<(&str, RequestParam)> for RequestOptions {
    fn from((url, params): (&str, RequestParam)) -> Self {
        Self::new(url).params(params)
    }
}

/// Multipart upload of one or more files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Path appended to the base URL
    pub url: String,
    pub files: Vec<PathBuf>,
    pub tag: Option<Tag>,
    /// Multipart field name used for every file part
    pub field_name: String,
}

impl UploadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            files: Vec::new(),
            tag: None,
            field_name: crate::defaults::upload::FIELD_NAME.to_string(),
        }
    }

    pub fn single(url: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self::new(url).file(file)
    }

    pub fn multiple<I, P>(url: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut req = Self::new(url);
        req.files = files.into_iter().map(Into::into).collect();
        req
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn maybe_tag(mut self, tag: Option<Tag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_means_no_params_and_no_tag() {
        let from_str: RequestOptions = "/user/info".into();
        let explicit = RequestOptions::new("/user/info")
            .params(RequestParam::new())
            .maybe_tag(None);
        assert_eq!(from_str, explicit);
        assert!(from_str.params.is_empty());
        assert!(from_str.tag.is_none());
    }

    #[test]
    fn kind_maps_to_http_method() {
        assert_eq!(RequestKind::Get.http_method(), reqwest::Method::GET);
        assert_eq!(RequestKind::Post.http_method(), reqwest::Method::POST);
        assert_eq!(RequestKind::Json.http_method(), reqwest::Method::POST);
        assert_eq!(RequestKind::default(), RequestKind::Get);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: RequestOptions = serde_json::from_str(r#"{"url": "/a"}"#).unwrap();
        assert_eq!(opts, RequestOptions::new("/a"));

        let opts: RequestOptions =
            serde_json::from_str(r#"{"url": "/a", "params": {"k": 1}, "tag": "home"}"#).unwrap();
        assert_eq!(opts.tag, Some(Tag::new("home")));
        assert_eq!(opts.params.get("k"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn upload_request_defaults() {
        let req = UploadRequest::single("/upload", "/tmp/a.png");
        assert_eq!(req.files.len(), 1);
        assert_eq!(req.field_name, "file");
        assert!(req.tag.is_none());

        let req = UploadRequest::multiple("/upload", ["/tmp/a.png", "/tmp/b.png"]).tag("album");
        assert_eq!(req.files.len(), 2);
        assert_eq!(req.tag.as_ref().map(Tag::as_str), Some("album"));
    }
}
