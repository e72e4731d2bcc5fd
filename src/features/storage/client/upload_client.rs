//! Client-side upload helper
//!
//! Small files go through the server's upload endpoint. Large files are
//! PUT straight to storage with a pre-signed URL so the server never handles
//! their bytes.

use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, multipart, Response};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::modules::storage::UploadFileResult;
use crate::shared::constants::{
    API_STORAGE_FILE_URL, API_STORAGE_PRESIGNED_URL, API_STORAGE_UPLOAD,
    PRESIGNED_UPLOAD_THRESHOLD,
};

#[derive(Debug, Error)]
pub enum UploadClientError {
    /// A step was rejected; carries the server's message or a fallback
    #[error("{0}")]
    Server(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// How a file reaches storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStrategy {
    /// Single multipart POST to the server, which uploads on our behalf
    Proxy,
    /// Pre-signed URL, direct PUT, then access URL lookup
    Presigned,
}

impl UploadStrategy {
    /// Files strictly below 10 MiB are proxied
    pub fn for_size(size: u64) -> Self {
        if size < PRESIGNED_UPLOAD_THRESHOLD {
            UploadStrategy::Proxy
        } else {
            UploadStrategy::Presigned
        }
    }
}

/// A file selected for upload
///
/// Request bodies share `data` by reference count, so uploading never copies it.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl LocalFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Error body returned by the storage endpoints
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the storage endpoints
pub struct UploadClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a file, choosing the strategy from its size
    ///
    /// # Returns
    /// The access URL of the stored file and its key
    pub async fn upload(
        &self,
        file: &LocalFile,
        folder: Option<&str>,
    ) -> Result<UploadFileResult, UploadClientError> {
        let strategy = UploadStrategy::for_size(file.size());
        debug!(
            "Uploading '{}' ({} bytes) via {:?}",
            file.name,
            file.size(),
            strategy
        );

        match strategy {
            UploadStrategy::Proxy => self.upload_via_server(file, folder).await,
            UploadStrategy::Presigned => self.upload_via_presigned_url(file, folder).await,
        }
    }

    async fn upload_via_server(
        &self,
        file: &LocalFile,
        folder: Option<&str>,
    ) -> Result<UploadFileResult, UploadClientError> {
        let part = multipart::Part::stream_with_length(file.data.clone(), file.size())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("folder", folder.unwrap_or_default().to_string());

        let response = self
            .http_client
            .post(self.endpoint(API_STORAGE_UPLOAD))
            .multipart(form)
            .send()
            .await?;

        Self::parse_result(response, "Failed to upload file").await
    }

    async fn upload_via_presigned_url(
        &self,
        file: &LocalFile,
        folder: Option<&str>,
    ) -> Result<UploadFileResult, UploadClientError> {
        // 1. Get a pre-signed URL
        let response = self
            .http_client
            .post(self.endpoint(API_STORAGE_PRESIGNED_URL))
            .json(&json!({
                "filename": file.name,
                "contentType": file.content_type,
                "folder": folder.unwrap_or_default(),
            }))
            .send()
            .await?;
        let presigned = Self::parse_result(response, "Failed to get pre-signed URL").await?;
        debug!("Received pre-signed URL for key '{}'", presigned.key);

        // 2. Upload directly to storage
        let response = self
            .http_client
            .put(&presigned.url)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.data.clone())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UploadClientError::Server(
                "Failed to upload file using pre-signed URL".to_string(),
            ));
        }

        // 3. Resolve the access URL
        let response = self
            .http_client
            .post(self.endpoint(API_STORAGE_FILE_URL))
            .json(&json!({ "key": presigned.key }))
            .send()
            .await?;

        Self::parse_result(response, "Failed to get file URL").await
    }

    /// Decode `{url, key}` or turn the error body into `UploadClientError::Server`
    async fn parse_result(
        response: Response,
        fallback: &str,
    ) -> Result<UploadFileResult, UploadClientError> {
        if response.status().is_success() {
            return Ok(response.json::<UploadFileResult>().await?);
        }

        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| fallback.to_string());
        debug!("Storage endpoint responded {}: {}", status, message);

        Err(UploadClientError::Server(message))
    }
}
