use thiserror::Error;

/// Errors raised by the storage layer
///
/// Every variant is a storage-layer error; the HTTP layer matches on this type
/// as a whole and reports its message.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Missing or invalid storage setup. Raised before any network call.
    #[error("{0}")]
    Configuration(String),

    /// Failure while writing an object
    #[error("{0}")]
    Upload(String),

    /// Any other storage failure (delete, presign, URL resolution)
    #[error("{0}")]
    Operation(String),

    /// Configured provider name has no implementation
    #[error("Unsupported storage provider: {0}")]
    UnsupportedProvider(String),
}

impl StorageError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
