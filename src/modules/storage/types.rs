use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};
use utoipa::ToSchema;

use super::error::{StorageError, StorageResult};

/// Default expiry for pre-signed upload URLs (1 hour)
pub const DEFAULT_PRESIGNED_UPLOAD_EXPIRY_SECS: u32 = 3600;

/// Expiry for signed retrieval URLs handed out after an upload (7 days)
pub const SIGNED_GET_EXPIRY_SECS: u32 = 7 * 24 * 3600;

/// File content handed to a provider
pub enum FilePayload {
    /// Bytes already in memory
    Bytes(Vec<u8>),
    /// File-like source, read fully into memory before the upload
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl FilePayload {
    /// Read the payload into a byte buffer
    pub async fn into_bytes(self) -> StorageResult<Vec<u8>> {
        match self {
            FilePayload::Bytes(data) => Ok(data),
            FilePayload::Reader(mut reader) => {
                let mut data = Vec::new();
                reader
                    .read_to_end(&mut data)
                    .await
                    .map_err(|e| StorageError::upload(format!("Failed to read file: {}", e)))?;
                Ok(data)
            }
        }
    }
}

impl From<Vec<u8>> for FilePayload {
    fn from(data: Vec<u8>) -> Self {
        FilePayload::Bytes(data)
    }
}

impl fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilePayload::Bytes(data) => write!(f, "Bytes({} bytes)", data.len()),
            FilePayload::Reader(_) => f.write_str("Reader"),
        }
    }
}

/// Parameters for a server-side upload
#[derive(Debug)]
pub struct UploadFileParams {
    pub file: FilePayload,
    pub filename: String,
    pub content_type: String,
    pub folder: Option<String>,
}

/// Location of a stored (or soon to be stored) object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadFileResult {
    /// Public URL, signed GET URL, or signed PUT URL depending on the operation
    pub url: String,
    /// Object key within the bucket
    #[schema(example = "avatars/0191d7a4-3f1e-4c6a-9b57-8d2f6f3e9a10.png")]
    pub key: String,
}

/// Parameters for a pre-signed upload URL
#[derive(Debug, Clone)]
pub struct PresignedUploadUrlParams {
    pub filename: String,
    pub content_type: String,
    pub folder: Option<String>,
    /// Expiry in seconds (default: 3600)
    pub expires_in: Option<u32>,
}

impl PresignedUploadUrlParams {
    pub fn expires_in_secs(&self) -> u32 {
        self.expires_in.unwrap_or(DEFAULT_PRESIGNED_UPLOAD_EXPIRY_SECS)
    }
}
