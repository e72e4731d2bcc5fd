use std::sync::Arc;

use tracing::{debug, info};

use crate::core::error::Result;
use crate::modules::storage::{
    FilePayload, PresignedUploadUrlParams, StorageProvider, UploadFileParams, UploadFileResult,
};

/// Service for storage operations, backed by an injected provider
pub struct StorageService {
    provider: Arc<dyn StorageProvider>,
}

impl StorageService {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Upload a file to the configured provider
    ///
    /// # Arguments
    /// * `file` - The file content
    /// * `filename` - Original filename with extension
    /// * `content_type` - The MIME type of the file
    /// * `folder` - Optional folder to store the file in
    ///
    /// # Returns
    /// The URL of the uploaded file and its storage key
    pub async fn upload_file(
        &self,
        file: impl Into<FilePayload>,
        filename: &str,
        content_type: &str,
        folder: Option<String>,
    ) -> Result<UploadFileResult> {
        let result = self
            .provider
            .upload_file(UploadFileParams {
                file: file.into(),
                filename: filename.to_string(),
                content_type: content_type.to_string(),
                folder,
            })
            .await?;

        info!("File uploaded: key={}", result.key);
        Ok(result)
    }

    /// Delete a file by its storage key
    pub async fn delete_file(&self, key: &str) -> Result<()> {
        self.provider.delete_file(key).await?;
        info!("File deleted: key={}", key);
        Ok(())
    }

    /// Generate a pre-signed URL for direct uploads
    ///
    /// The provider applies its default expiry when `expires_in` is `None`.
    pub async fn get_presigned_upload_url(
        &self,
        filename: &str,
        content_type: &str,
        folder: Option<String>,
        expires_in: Option<u32>,
    ) -> Result<UploadFileResult> {
        let result = self
            .provider
            .get_presigned_upload_url(PresignedUploadUrlParams {
                filename: filename.to_string(),
                content_type: content_type.to_string(),
                folder,
                expires_in,
            })
            .await?;

        debug!("Presigned upload url generated: key={}", result.key);
        Ok(result)
    }

    /// Resolve the access URL for a stored key
    pub async fn get_file_url(&self, key: &str) -> Result<UploadFileResult> {
        Ok(self.provider.get_file_url(key).await?)
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }
}
