//! Request facade
//!
//! [`HttpClient`] owns one `reqwest::Client` and a fixed base URL. Every call
//! appends its path to the base URL, emits one diagnostic log line and issues
//! exactly one HTTP request:
//!
//! | kind                | method | parameters                          |
//! |---------------------|--------|-------------------------------------|
//! | [`RequestKind::Get`]  | GET    | query string                        |
//! | [`RequestKind::Post`] | POST   | `application/x-www-form-urlencoded` |
//! | [`RequestKind::Json`] | POST   | JSON object body                    |
//!
//! Uploads send every file as a part of one `multipart/form-data` POST.
//!
//! ```rust,ignore
//! let client = HttpClient::new(NetConfig::new("https://api.example.com/app"))?;
//!
//! let home = client.get("/home/banner").await?;
//! let login = client
//!     .post(RequestOptions::new("/user/login").params(params).tag("login"))
//!     .await?;
//! client.cancel("login");
//! ```

use crate::config::NetConfig;
use crate::defaults::HTTP_LOG_TARGET;
use crate::error::NetError;
use crate::execution::http::{
    HttpInterceptor, HttpRequestContext, build_http_client_from_config, classify_http_error,
};
use crate::observability::format_params_for_logging;
use crate::types::{NetResponse, RequestKind, RequestOptions, Tag, UploadRequest};
use crate::utils::{TagGuard, TagRegistry};
use crate::utils::mime::guess_mime;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    redact_params: bool,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    tags: Arc<TagRegistry>,
}

/// Request facade over a single shared `reqwest::Client`.
///
/// Cloning is cheap and every clone shares the connection pool and the tag
/// registry.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.base_url)
            .field("redact_params", &self.inner.redact_params)
            .field("interceptors", &self.inner.interceptors.len())
            .finish()
    }
}

impl HttpClient {
    pub fn new(config: NetConfig) -> Result<Self, NetError> {
        HttpClientBuilder::new(config).build()
    }

    pub fn builder(config: NetConfig) -> HttpClientBuilder {
        HttpClientBuilder::new(config)
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Whether both handles share the same underlying client.
    pub fn same_instance(&self, other: &HttpClient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Base URL followed by `path`, verbatim.
    pub fn resolve_url(&self, path: &str) -> Result<String, NetError> {
        if path.is_empty() {
            return Err(NetError::InvalidParameter(
                "request url must not be empty".to_string(),
            ));
        }
        Ok(format!("{}{}", self.inner.base_url, path))
    }

    /// GET with parameters in the query string.
    pub async fn get(&self, options: impl Into<RequestOptions>) -> Result<NetResponse, NetError> {
        self.dispatch(RequestKind::Get, options.into()).await
    }

    /// POST with parameters as an urlencoded form.
    pub async fn post(&self, options: impl Into<RequestOptions>) -> Result<NetResponse, NetError> {
        self.dispatch(RequestKind::Post, options.into()).await
    }

    /// POST with parameters serialized as a JSON object body.
    pub async fn json(&self, options: impl Into<RequestOptions>) -> Result<NetResponse, NetError> {
        self.dispatch(RequestKind::Json, options.into()).await
    }

    pub async fn request(
        &self,
        kind: RequestKind,
        options: impl Into<RequestOptions>,
    ) -> Result<NetResponse, NetError> {
        self.dispatch(kind, options.into()).await
    }

    /// Run a request on the tokio runtime and collect its result later.
    ///
    /// The tag is registered before this returns, so a [`HttpClient::cancel`]
    /// issued right after `spawn` reaches the request. Must be called from
    /// within a tokio runtime.
    pub fn spawn(&self, kind: RequestKind, options: impl Into<RequestOptions>) -> PendingRequest {
        let client = self.clone();
        let options = options.into();
        let guard = self.register(options.tag.as_ref());
        PendingRequest::spawn(async move { client.dispatch_with(kind, options, guard).await })
    }

    /// Upload a single file as a multipart part named `file`.
    pub async fn upload_file(
        &self,
        url: impl Into<String>,
        file: impl Into<PathBuf>,
        tag: Option<Tag>,
    ) -> Result<NetResponse, NetError> {
        self.upload(UploadRequest::single(url, file).maybe_tag(tag))
            .await
    }

    /// Upload several files in one multipart request, one part per file.
    pub async fn upload_files<I, P>(
        &self,
        url: impl Into<String>,
        files: I,
        tag: Option<Tag>,
    ) -> Result<NetResponse, NetError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.upload(UploadRequest::multiple(url, files).maybe_tag(tag))
            .await
    }

    pub async fn upload(&self, request: UploadRequest) -> Result<NetResponse, NetError> {
        if request.files.is_empty() {
            return Err(NetError::InvalidParameter(
                "upload needs at least one file".to_string(),
            ));
        }
        let guard = self.register(request.tag.as_ref());
        let url = self.resolve_url(&request.url)?;
        tracing::debug!(
            target: HTTP_LOG_TARGET,
            url = %url,
            files = ?request.files,
            tag = request.tag.as_ref().map(Tag::as_str).unwrap_or("-"),
            "upload"
        );

        let form = build_upload_form(&request.files, &request.field_name).await?;
        let ctx = HttpRequestContext::for_upload(url, request.tag);
        let builder = self.inner.http.post(&ctx.url).multipart(form);
        self.execute(ctx, builder, guard).await
    }

    /// Cancel every in-flight request carrying `tag`; they resolve to
    /// [`NetError::Cancelled`]. Returns how many were cancelled.
    pub fn cancel(&self, tag: impl Into<Tag>) -> usize {
        let tag = tag.into();
        let cancelled = self.inner.tags.cancel(&tag);
        tracing::debug!(target: HTTP_LOG_TARGET, tag = %tag, cancelled, "cancel tag");
        cancelled
    }

    pub fn cancel_all(&self) -> usize {
        self.inner.tags.cancel_all()
    }

    /// Number of in-flight requests carrying `tag`.
    pub fn in_flight(&self, tag: impl Into<Tag>) -> usize {
        self.inner.tags.in_flight(&tag.into())
    }

    fn register(&self, tag: Option<&Tag>) -> Option<TagGuard> {
        tag.map(|tag| self.inner.tags.register(tag))
    }

    async fn dispatch(
        &self,
        kind: RequestKind,
        options: RequestOptions,
    ) -> Result<NetResponse, NetError> {
        let guard = self.register(options.tag.as_ref());
        self.dispatch_with(kind, options, guard).await
    }

    async fn dispatch_with(
        &self,
        kind: RequestKind,
        options: RequestOptions,
        guard: Option<TagGuard>,
    ) -> Result<NetResponse, NetError> {
        let RequestOptions { url, params, tag } = options;
        let url = self.resolve_url(&url)?;
        tracing::debug!(
            target: HTTP_LOG_TARGET,
            kind = %kind,
            url = %url,
            params = %format_params_for_logging(&params, self.inner.redact_params),
            tag = tag.as_ref().map(Tag::as_str).unwrap_or("-"),
            "request"
        );

        let http = &self.inner.http;
        let builder = match kind {
            RequestKind::Get => http.get(&url).query(&params.parameter()),
            RequestKind::Post => http.post(&url).form(&params.parameter()),
            RequestKind::Json => http
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(params.to_json()),
        };
        let ctx = HttpRequestContext::new(kind, url, tag);
        self.execute(ctx, builder, guard).await
    }

    async fn execute(
        &self,
        ctx: HttpRequestContext,
        builder: reqwest::RequestBuilder,
        guard: Option<TagGuard>,
    ) -> Result<NetResponse, NetError> {
        let send = self.send(&ctx, builder);
        let result = match &guard {
            Some(guard) => guard.run(send).await,
            None => send.await,
        };
        if let Err(err) = &result
            && err.is_cancelled()
        {
            self.notify_error(&ctx, err);
        }
        result
    }

    async fn send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<NetResponse, NetError> {
        let mut rb = builder;
        for interceptor in &self.inner.interceptors {
            rb = match interceptor.on_before_send(ctx, rb) {
                Ok(rb) => rb,
                Err(e) => return Err(self.fail(ctx, e)),
            };
        }

        let resp = match rb.send().await {
            Ok(resp) => resp,
            Err(e) => return Err(self.fail(ctx, e.into())),
        };

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let text = resp.text().await.unwrap_or_default();
            let error = classify_http_error(
                &ctx.url,
                status.as_u16(),
                &text,
                &headers,
                status.canonical_reason(),
            );
            return Err(self.fail(ctx, error));
        }

        for interceptor in &self.inner.interceptors {
            if let Err(e) = interceptor.on_response(ctx, &resp) {
                return Err(self.fail(ctx, e));
            }
        }

        let headers = resp.headers().clone();
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(ctx, e.into())),
        };

        Ok(NetResponse {
            status: status.as_u16(),
            headers,
            body,
            url: ctx.url.clone(),
        })
    }

    fn fail(&self, ctx: &HttpRequestContext, error: NetError) -> NetError {
        self.notify_error(ctx, &error);
        error
    }

    fn notify_error(&self, ctx: &HttpRequestContext, error: &NetError) {
        for interceptor in &self.inner.interceptors {
            interceptor.on_error(ctx, error);
        }
    }
}

async fn build_upload_form(
    files: &[PathBuf],
    field_name: &str,
) -> Result<reqwest::multipart::Form, NetError> {
    let mut form = reqwest::multipart::Form::new();
    for path in files {
        form = form.part(field_name.to_string(), file_part(path).await?);
    }
    Ok(form)
}

async fn file_part(path: &Path) -> Result<reqwest::multipart::Part, NetError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| NetError::IoError(format!("{}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::defaults::upload::FIELD_NAME.to_string());
    let mime = guess_mime(Some(&bytes), path.to_str());
    reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&mime)
        .map_err(|e| NetError::InvalidParameter(format!("invalid MIME type '{mime}': {e}")))
}

/// Builder for [`HttpClient`]
pub struct HttpClientBuilder {
    config: NetConfig,
    http_client: Option<reqwest::Client>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl HttpClientBuilder {
    pub fn new(config: NetConfig) -> Self {
        Self {
            config,
            http_client: None,
            interceptors: Vec::new(),
        }
    }

    /// Use a preconfigured `reqwest::Client`; `HttpConfig` and the bearer
    /// token are then ignored.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Add the built-in [`crate::execution::http::LoggingInterceptor`].
    pub fn with_logging(self) -> Self {
        self.with_interceptor(Arc::new(crate::execution::http::LoggingInterceptor))
    }

    pub fn build(self) -> Result<HttpClient, NetError> {
        self.config.validate()?;
        let http = match self.http_client {
            Some(client) => client,
            None => {
                let extra: Vec<(&str, String)> = self
                    .config
                    .bearer_header()
                    .map(|v| vec![("authorization", v)])
                    .unwrap_or_default();
                build_http_client_from_config(&self.config.http, &extra)?
            }
        };
        tracing::debug!(target: HTTP_LOG_TARGET, base_url = %self.config.base_url, "client created");
        Ok(HttpClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.config.base_url,
                redact_params: self.config.redact_params,
                interceptors: self.interceptors,
                tags: Arc::new(TagRegistry::new()),
            }),
        })
    }
}

/// Result of a spawned request; resolves exactly once.
#[derive(Debug)]
pub struct PendingRequest {
    rx: oneshot::Receiver<Result<NetResponse, NetError>>,
}

impl PendingRequest {
    fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<NetResponse, NetError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
        Self { rx }
    }
}

impl Future for PendingRequest {
    type Output = Result<NetResponse, NetError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|res| {
            res.unwrap_or_else(|_| {
                Err(NetError::HttpError(
                    "request task ended without a result".to_string(),
                ))
            })
        })
    }
}
