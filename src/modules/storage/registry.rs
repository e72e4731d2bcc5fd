//! Provider selection
//!
//! The server builds its provider once at startup and hands it to whoever
//! needs it. New backends are added as `ProviderKind` variants.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::error::StorageError;
use super::provider::StorageProvider;
use super::s3_provider::S3Provider;
use crate::core::config::StorageConfig;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    S3,
}

impl FromStr for ProviderKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(ProviderKind::S3),
            _ => Err(StorageError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Build the provider selected by `config.provider`
pub fn create_provider(config: &StorageConfig) -> Result<Arc<dyn StorageProvider>, StorageError> {
    let kind: ProviderKind = config.provider.parse()?;

    let provider: Arc<dyn StorageProvider> = match kind {
        ProviderKind::S3 => Arc::new(S3Provider::new(config.clone())),
    };

    info!("Storage provider initialized: {}", provider.provider_name());
    Ok(provider)
}
