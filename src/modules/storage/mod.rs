//! Storage module for file management
//!
//! Provides the storage provider abstraction and its S3-compatible
//! implementation: uploads, deletes, and pre-signed URL generation.

mod error;
mod key;
mod provider;
mod registry;
mod s3_provider;
mod types;

pub use error::{StorageError, StorageResult};
pub use key::{file_extension, generate_object_key};
pub use provider::StorageProvider;
pub use registry::{create_provider, ProviderKind};
pub use s3_provider::S3Provider;
pub use types::{
    FilePayload, PresignedUploadUrlParams, UploadFileParams, UploadFileResult,
    DEFAULT_PRESIGNED_UPLOAD_EXPIRY_SECS, SIGNED_GET_EXPIRY_SECS,
};
