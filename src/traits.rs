//! Injection seam for code that issues requests.
//!
//! Callers depend on `Arc<dyn Requester>` (or a generic `R: Requester`) and
//! receive an [`HttpClient`] in production or a stub in tests.

use crate::client::HttpClient;
use crate::error::NetError;
use crate::types::{NetResponse, RequestKind, RequestOptions, Tag, UploadRequest};
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait Requester: Send + Sync {
    async fn request(
        &self,
        kind: RequestKind,
        options: RequestOptions,
    ) -> Result<NetResponse, NetError>;

    async fn upload(&self, request: UploadRequest) -> Result<NetResponse, NetError>;

    async fn get(&self, options: RequestOptions) -> Result<NetResponse, NetError> {
        self.request(RequestKind::Get, options).await
    }

    async fn post(&self, options: RequestOptions) -> Result<NetResponse, NetError> {
        self.request(RequestKind::Post, options).await
    }

    async fn json(&self, options: RequestOptions) -> Result<NetResponse, NetError> {
        self.request(RequestKind::Json, options).await
    }

    async fn upload_file(
        &self,
        url: String,
        file: PathBuf,
        tag: Option<Tag>,
    ) -> Result<NetResponse, NetError> {
        self.upload(UploadRequest::single(url, file).maybe_tag(tag))
            .await
    }

    async fn upload_files(
        &self,
        url: String,
        files: Vec<PathBuf>,
        tag: Option<Tag>,
    ) -> Result<NetResponse, NetError> {
        self.upload(UploadRequest::multiple(url, files).maybe_tag(tag))
            .await
    }
}

#[async_trait]
impl Requester for HttpClient {
    async fn request(
        &self,
        kind: RequestKind,
        options: RequestOptions,
    ) -> Result<NetResponse, NetError> {
        HttpClient::request(self, kind, options).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<NetResponse, NetError> {
        HttpClient::upload(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StubRequester {
        calls: Mutex<Vec<(RequestKind, RequestOptions)>>,
        uploads: Mutex<Vec<UploadRequest>>,
    }

    #[async_trait]
    impl Requester for StubRequester {
        async fn request(
            &self,
            kind: RequestKind,
            options: RequestOptions,
        ) -> Result<NetResponse, NetError> {
            self.calls.lock().unwrap().push((kind, options));
            Err(NetError::HttpError("stub".into()))
        }

        async fn upload(&self, request: UploadRequest) -> Result<NetResponse, NetError> {
            self.uploads.lock().unwrap().push(request);
            Err(NetError::HttpError("stub".into()))
        }
    }

    #[tokio::test]
    async fn provided_methods_pick_the_kind() {
        let stub = Arc::new(StubRequester::default());
        let requester: Arc<dyn Requester> = stub.clone();

        let _ = requester.get(RequestOptions::new("/a")).await;
        let _ = requester.post(RequestOptions::new("/b").tag("t")).await;
        let _ = requester.json(RequestOptions::new("/c")).await;

        let calls = stub.calls.lock().unwrap();
        let kinds: Vec<RequestKind> = calls.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![RequestKind::Get, RequestKind::Post, RequestKind::Json]);
        assert_eq!(calls[1].1.tag, Some(Tag::new("t")));
        assert!(calls[0].1.tag.is_none());
    }

    #[tokio::test]
    async fn upload_helpers_build_requests() {
        let stub = Arc::new(StubRequester::default());
        let requester: Arc<dyn Requester> = stub.clone();

        let _ = requester
            .upload_file("/avatar".into(), PathBuf::from("a.png"), None)
            .await;
        let _ = requester
            .upload_files(
                "/album".into(),
                vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
                Some(Tag::new("album")),
            )
            .await;

        let uploads = stub.uploads.lock().unwrap();
        assert_eq!(uploads[0].files.len(), 1);
        assert!(uploads[0].tag.is_none());
        assert_eq!(uploads[1].files.len(), 2);
        assert_eq!(uploads[1].tag, Some(Tag::new("album")));
    }
}
