//! In-memory storage provider for handler and client tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::modules::storage::{
    generate_object_key, PresignedUploadUrlParams, StorageError, StorageProvider,
    StorageResult, UploadFileParams, UploadFileResult,
};

/// Shared record of operations, in call order
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Provider that keeps nothing and records every call
pub struct FakeStorageProvider {
    calls: CallLog,
    public_base: String,
    presign_base: String,
    failure: Option<String>,
}

impl FakeStorageProvider {
    pub fn new() -> Self {
        Self::with_presign_base("https://storage.test/presigned")
    }

    /// Pre-signed URLs will be `<presign_base>/<key>`
    pub fn with_presign_base(presign_base: impl Into<String>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            public_base: "https://cdn.test".to_string(),
            presign_base: presign_base.into(),
            failure: None,
        }
    }

    /// Every operation fails with a storage error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: String) -> StorageResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(StorageError::operation(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for FakeStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageProvider for FakeStorageProvider {
    async fn upload_file(&self, params: UploadFileParams) -> StorageResult<UploadFileResult> {
        let size = params.file.into_bytes().await?.len();
        self.record(format!("upload_file:{}:{}", params.filename, size))?;

        let key = generate_object_key(&params.filename, params.folder.as_deref());
        Ok(UploadFileResult {
            url: format!("{}/{}", self.public_base, key),
            key,
        })
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        self.record(format!("delete_file:{}", key))
    }

    async fn get_presigned_upload_url(
        &self,
        params: PresignedUploadUrlParams,
    ) -> StorageResult<UploadFileResult> {
        self.record(format!(
            "get_presigned_upload_url:{}:{:?}",
            params.filename,
            params.expires_in
        ))?;

        let key = generate_object_key(&params.filename, params.folder.as_deref());
        Ok(UploadFileResult {
            url: format!("{}/{}", self.presign_base, key),
            key,
        })
    }

    async fn get_file_url(&self, key: &str) -> StorageResult<UploadFileResult> {
        self.record(format!("get_file_url:{}", key))?;
        Ok(UploadFileResult {
            url: format!("{}/{}", self.public_base, key),
            key: key.to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "Fake"
    }
}
