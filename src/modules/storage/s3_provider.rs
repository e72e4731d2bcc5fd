//! S3-compatible storage provider
//!
//! Works with Amazon S3 and S3-compatible services (Cloudflare R2, MinIO, ...).
//! The bucket client is built on first use and reused afterwards.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use async_trait::async_trait;
use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderValue};
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tokio::sync::OnceCell;
use tracing::{debug, error};

use super::error::{StorageError, StorageResult};
use super::key::generate_object_key;
use super::provider::StorageProvider;
use super::types::{
    PresignedUploadUrlParams, UploadFileParams, UploadFileResult, SIGNED_GET_EXPIRY_SECS,
};
use crate::core::config::StorageConfig;

/// S3 storage provider
pub struct S3Provider {
    config: StorageConfig,
    bucket: OnceCell<Box<Bucket>>,
}

impl S3Provider {
    pub const NAME: &'static str = "S3";

    /// Create a provider. No client is built until the first operation.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            bucket: OnceCell::new(),
        }
    }

    /// Get the bucket client, building it on first use
    async fn bucket(&self) -> StorageResult<&Bucket> {
        let bucket = self
            .bucket
            .get_or_try_init(|| async { self.build_bucket() })
            .await?;
        Ok(&**bucket)
    }

    fn build_bucket(&self) -> StorageResult<Box<Bucket>> {
        let config = &self.config;

        if config.region.is_empty() {
            return Err(StorageError::configuration(
                "Storage region is not configured",
            ));
        }
        if config.bucket_name.is_empty() {
            return Err(StorageError::configuration(
                "Storage bucket name is not configured",
            ));
        }

        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| {
            StorageError::configuration(format!("Failed to create storage credentials: {}", e))
        })?;

        // Custom endpoint for S3-compatible services like Cloudflare R2 or MinIO
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse::<Region>().map_err(|e| {
                StorageError::configuration(format!("Invalid storage region: {}", e))
            })?,
        };

        let mut bucket = Bucket::new(&config.bucket_name, region, credentials).map_err(|e| {
            StorageError::configuration(format!("Failed to create storage client: {}", e))
        })?;

        if config.uses_path_style() {
            bucket.set_path_style();
        }

        debug!(
            "S3 client initialized for bucket: {}, endpoint: {}, path_style: {}",
            config.bucket_name,
            config.endpoint.as_deref().unwrap_or("aws"),
            config.uses_path_style()
        );

        Ok(bucket)
    }

    /// Public URL for a key when a public base URL is configured
    fn public_url(&self, key: &str) -> Option<String> {
        self.config
            .public_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), key))
    }

    /// Public URL if configured, otherwise a 7-day signed GET URL
    async fn resolve_url(&self, bucket: &Bucket, key: &str) -> StorageResult<String> {
        if let Some(url) = self.public_url(key) {
            debug!("Resolved public url for '{}'", key);
            return Ok(url);
        }

        let url = bucket
            .presign_get(key, SIGNED_GET_EXPIRY_SECS, None)
            .await
            .map_err(|e| {
                StorageError::operation(format!(
                    "Failed to generate signed URL for '{}': {}",
                    key, e
                ))
            })?;
        debug!("Resolved signed url for '{}'", key);
        Ok(url)
    }

    async fn put_object(&self, params: UploadFileParams) -> StorageResult<UploadFileResult> {
        let bucket = self.bucket().await?;
        let key = generate_object_key(&params.filename, params.folder.as_deref());
        let data = params.file.into_bytes().await?;

        let response = bucket
            .put_object_with_content_type(&key, &data, &params.content_type)
            .await
            .map_err(|e| StorageError::upload(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::upload(format!(
                "Storage responded with status {} while uploading '{}'",
                status, key
            )));
        }

        debug!(
            "Uploaded file '{}' ({} bytes) to bucket '{}'",
            key,
            data.len(),
            self.config.bucket_name
        );

        let url = self.resolve_url(bucket, &key).await?;
        Ok(UploadFileResult { url, key })
    }
}

#[async_trait]
impl StorageProvider for S3Provider {
    async fn upload_file(&self, params: UploadFileParams) -> StorageResult<UploadFileResult> {
        self.put_object(params).await.map_err(|e| match e {
            StorageError::Configuration(_) => {
                error!("upload_file, configuration error: {}", e);
                e
            }
            other => {
                error!("upload_file, error: {}", other);
                StorageError::upload(other.to_string())
            }
        })
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        let bucket = self.bucket().await?;

        let response = bucket.delete_object(key).await.map_err(|e| {
            let error_str = e.to_string();
            error!("delete_file, error: {}", error_str);
            StorageError::operation(error_str)
        })?;

        // Deleting a missing object is not an error
        let status = response.status_code();
        if !(200..300).contains(&status) && status != 404 {
            return Err(StorageError::operation(format!(
                "Storage responded with status {} while deleting '{}'",
                status, key
            )));
        }

        debug!(
            "Deleted file '{}' from bucket '{}'",
            key, self.config.bucket_name
        );
        Ok(())
    }

    async fn get_presigned_upload_url(
        &self,
        params: PresignedUploadUrlParams,
    ) -> StorageResult<UploadFileResult> {
        let bucket = self.bucket().await?;
        let key = generate_object_key(&params.filename, params.folder.as_deref());
        let expires_in = params.expires_in_secs();

        let content_type = HeaderValue::from_str(&params.content_type).map_err(|e| {
            StorageError::operation(format!(
                "Invalid content type '{}': {}",
                params.content_type, e
            ))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type);

        let url = bucket
            .presign_put(&key, expires_in, Some(headers), None)
            .await
            .map_err(|e| {
                let error_str = e.to_string();
                error!("get_presigned_upload_url, error: {}", error_str);
                StorageError::operation(error_str)
            })?;

        debug!(
            "Generated presigned upload url for '{}' (expires in {}s)",
            key, expires_in
        );
        Ok(UploadFileResult { url, key })
    }

    async fn get_file_url(&self, key: &str) -> StorageResult<UploadFileResult> {
        let bucket = self.bucket().await?;
        let url = self.resolve_url(bucket, key).await?;
        Ok(UploadFileResult {
            url,
            key: key.to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::types::FilePayload;
    use axum::{
        extract::State,
        http::{Method, StatusCode, Uri},
        response::IntoResponse,
        Router,
    };
    use std::sync::{Arc, Mutex};

    /// Requests seen by the fake S3 endpoint: (method, path)
    type RequestLog = Arc<Mutex<Vec<(Method, String)>>>;

    fn test_config(endpoint: Option<String>) -> StorageConfig {
        StorageConfig {
            region: "us-east-1".to_string(),
            endpoint,
            access_key_id: "test-access-key".to_string(),
            secret_access_key: "test-secret-key".to_string(),
            bucket_name: "uploads".to_string(),
            public_url: None,
            force_path_style: true,
            provider: "s3".to_string(),
        }
    }

    fn upload_params(filename: &str, folder: Option<&str>) -> UploadFileParams {
        UploadFileParams {
            file: FilePayload::Bytes(vec![7u8; 2048]),
            filename: filename.to_string(),
            content_type: "image/png".to_string(),
            folder: folder.map(String::from),
        }
    }

    /// Start a minimal S3 stand-in answering every request with `status`
    async fn spawn_fake_s3(status: StatusCode) -> (String, RequestLog) {
        async fn handle(
            State((log, status)): State<(RequestLog, StatusCode)>,
            method: Method,
            uri: Uri,
        ) -> impl IntoResponse {
            log.lock().unwrap().push((method, uri.path().to_string()));
            (status, [("ETag", "\"d41d8cd98f00b204e9800998ecf8427e\"")], "")
        }

        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .fallback(handle)
            .with_state((Arc::clone(&log), status));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), log)
    }

    #[tokio::test]
    async fn test_missing_region_fails_every_operation_before_network() {
        let (endpoint, log) = spawn_fake_s3(StatusCode::OK).await;
        let provider = S3Provider::new(StorageConfig {
            region: String::new(),
            ..test_config(Some(endpoint))
        });

        let upload = provider.upload_file(upload_params("photo.png", None)).await;
        let delete = provider.delete_file("avatars/photo.png").await;
        let presign = provider
            .get_presigned_upload_url(PresignedUploadUrlParams {
                filename: "photo.png".to_string(),
                content_type: "image/png".to_string(),
                folder: None,
                expires_in: Some(60),
            })
            .await;
        let file_url = provider.get_file_url("avatars/photo.png").await;

        for result in [upload.map(|_| ()), delete, presign.map(|_| ()), file_url.map(|_| ())] {
            let err = result.unwrap_err();
            assert!(matches!(err, StorageError::Configuration(_)), "unexpected error: {:?}", err);
            assert_eq!(err.to_string(), "Storage region is not configured");
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_bucket_fails_every_operation_before_network() {
        let (endpoint, log) = spawn_fake_s3(StatusCode::OK).await;
        let provider = S3Provider::new(StorageConfig {
            bucket_name: String::new(),
            ..test_config(Some(endpoint))
        });

        let upload = provider.upload_file(upload_params("photo.png", None)).await;
        let delete = provider.delete_file("avatars/photo.png").await;
        let presign = provider
            .get_presigned_upload_url(PresignedUploadUrlParams {
                filename: "photo.png".to_string(),
                content_type: "image/png".to_string(),
                folder: None,
                expires_in: None,
            })
            .await;
        let file_url = provider.get_file_url("avatars/photo.png").await;

        for result in [upload.map(|_| ()), delete, presign.map(|_| ()), file_url.map(|_| ())] {
            let err = result.unwrap_err();
            assert!(err.is_configuration(), "unexpected error: {:?}", err);
            assert_eq!(err.to_string(), "Storage bucket name is not configured");
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_returns_public_url_when_configured() {
        let (endpoint, log) = spawn_fake_s3(StatusCode::OK).await;
        let provider = S3Provider::new(StorageConfig {
            public_url: Some("https://cdn.example.com/".to_string()),
            ..test_config(Some(endpoint))
        });

        let result = provider
            .upload_file(upload_params("photo.png", Some("avatars")))
            .await
            .unwrap();

        assert!(result.key.starts_with("avatars/"));
        assert!(result.key.ends_with(".png"));
        assert_eq!(result.url, format!("https://cdn.example.com/{}", result.key));

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, Method::PUT);
        assert_eq!(log[0].1, format!("/uploads/{}", result.key));
    }

    #[tokio::test]
    async fn test_upload_returns_seven_day_signed_url_without_public_url() {
        let (endpoint, _log) = spawn_fake_s3(StatusCode::OK).await;
        let provider = S3Provider::new(test_config(Some(endpoint.clone())));

        let result = provider
            .upload_file(upload_params("photo.png", None))
            .await
            .unwrap();

        assert!(result
            .url
            .starts_with(&format!("{}/uploads/{}?", endpoint, result.key)));
        assert!(result.url.contains("X-Amz-Expires=604800"));
        assert!(result.url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn test_upload_failure_is_upload_error() {
        let (endpoint, _log) = spawn_fake_s3(StatusCode::INTERNAL_SERVER_ERROR).await;
        let provider = S3Provider::new(test_config(Some(endpoint)));

        let err = provider
            .upload_file(upload_params("photo.png", None))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Upload(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_delete_issues_true_delete() {
        let (endpoint, log) = spawn_fake_s3(StatusCode::NO_CONTENT).await;
        let provider = S3Provider::new(test_config(Some(endpoint)));

        provider.delete_file("avatars/photo.png").await.unwrap();

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![(Method::DELETE, "/uploads/avatars/photo.png".to_string())]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_object_succeeds() {
        let (endpoint, _log) = spawn_fake_s3(StatusCode::NOT_FOUND).await;
        let provider = S3Provider::new(test_config(Some(endpoint)));

        assert!(provider.delete_file("missing.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_presigned_upload_url_uses_requested_expiry() {
        let provider = S3Provider::new(test_config(Some("http://127.0.0.1:9000".to_string())));

        let default_expiry = provider
            .get_presigned_upload_url(PresignedUploadUrlParams {
                filename: "video-thumb.webp".to_string(),
                content_type: "image/webp".to_string(),
                folder: None,
                expires_in: None,
            })
            .await
            .unwrap();
        assert!(default_expiry.key.ends_with(".webp"));
        assert!(default_expiry
            .url
            .starts_with(&format!("http://127.0.0.1:9000/uploads/{}?", default_expiry.key)));
        assert!(default_expiry.url.contains("X-Amz-Expires=3600"));

        let custom_expiry = provider
            .get_presigned_upload_url(PresignedUploadUrlParams {
                filename: "video-thumb.webp".to_string(),
                content_type: "image/webp".to_string(),
                folder: Some("thumbs".to_string()),
                expires_in: Some(900),
            })
            .await
            .unwrap();
        assert!(custom_expiry.key.starts_with("thumbs/"));
        assert!(custom_expiry.url.contains("X-Amz-Expires=900"));
        assert_ne!(default_expiry.key, custom_expiry.key);
    }

    #[tokio::test]
    async fn test_file_url_prefers_public_url() {
        let provider = S3Provider::new(StorageConfig {
            public_url: Some("https://cdn.example.com".to_string()),
            ..test_config(None)
        });

        let result = provider.get_file_url("avatars/a.png").await.unwrap();

        assert_eq!(result.url, "https://cdn.example.com/avatars/a.png");
        assert_eq!(result.key, "avatars/a.png");
    }

    #[tokio::test]
    async fn test_file_url_is_signed_without_public_url() {
        let provider = S3Provider::new(test_config(Some("http://127.0.0.1:9000".to_string())));

        let result = provider.get_file_url("avatars/a.png").await.unwrap();

        assert!(result
            .url
            .starts_with("http://127.0.0.1:9000/uploads/avatars/a.png?"));
        assert!(result.url.contains("X-Amz-Expires=604800"));
    }

    #[test]
    fn test_provider_name() {
        let provider = S3Provider::new(test_config(None));
        assert_eq!(provider.provider_name(), "S3");
    }
}
