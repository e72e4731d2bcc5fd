use async_trait::async_trait;

use super::error::StorageResult;
use super::types::{PresignedUploadUrlParams, UploadFileParams, UploadFileResult};

/// Capability set every storage backend implements
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Upload a file and return its access URL and key
    async fn upload_file(&self, params: UploadFileParams) -> StorageResult<UploadFileResult>;

    /// Delete the object at `key`. Succeeds when the object does not exist.
    async fn delete_file(&self, key: &str) -> StorageResult<()>;

    /// Generate a time-limited URL the caller can PUT the raw file to
    async fn get_presigned_upload_url(
        &self,
        params: PresignedUploadUrlParams,
    ) -> StorageResult<UploadFileResult>;

    /// Resolve the access URL for an existing key
    async fn get_file_url(&self, key: &str) -> StorageResult<UploadFileResult>;

    /// Fixed provider name for diagnostics
    fn provider_name(&self) -> &'static str;
}
