use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::shared::validation::FOLDER_REGEX;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
pub struct UploadFileDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Optional folder to store the file in
    #[schema(example = "avatars")]
    pub folder: Option<String>,
}

/// Request DTO for a pre-signed upload URL
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlRequestDto {
    /// Original filename, used for the key's extension
    #[serde(default)]
    #[validate(length(min = 1, message = "Filename is required"))]
    #[schema(example = "video-thumb.webp")]
    pub filename: String,
    /// MIME type the file will be uploaded with
    #[serde(default)]
    #[validate(length(min = 1, message = "Content type is required"))]
    #[schema(example = "image/webp")]
    pub content_type: String,
    /// Optional folder to store the file in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_folder"))]
    pub folder: Option<String>,
}

/// Request DTO for resolving a key to its access URL
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FileUrlRequestDto {
    /// Object key returned by an upload
    #[serde(default)]
    #[validate(length(min = 1, message = "File key is required"))]
    pub key: String,
}

/// Request DTO for deleting a file by key
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeleteFileRequestDto {
    /// Object key to delete
    #[serde(default)]
    #[validate(length(min = 1, message = "File key is required"))]
    pub key: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    /// Confirmation that the file was deleted
    pub deleted: bool,
    pub key: String,
}

/// Content types accepted by the proxied upload endpoint
pub const UPLOAD_ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Content types accepted for pre-signed uploads
pub const PRESIGNED_ALLOWED_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum file size in bytes for proxied uploads (10MB)
pub const MAX_FILE_SIZE: usize = crate::shared::constants::MAX_PROXY_UPLOAD_SIZE;

/// Order in which pre-signed request fields are reported
pub const PRESIGNED_FIELD_ORDER: &[&str] = &["filename", "content_type", "folder"];

/// Empty folder values mean "no folder"
pub fn normalize_folder(folder: Option<String>) -> Option<String> {
    folder.filter(|f| !f.is_empty())
}

/// Accept an empty folder (treated as none) or a well-formed folder path
pub fn validate_folder(folder: &str) -> Result<(), ValidationError> {
    if folder.is_empty() || FOLDER_REGEX.is_match(folder) {
        Ok(())
    } else {
        Err(ValidationError::new("folder").with_message("Invalid folder name".into()))
    }
}

/// First validation message, checking fields in `field_order`
pub fn first_validation_message(
    errors: &validator::ValidationErrors,
    field_order: &[&str],
) -> String {
    let field_errors = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
