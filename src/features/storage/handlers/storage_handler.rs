use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::storage::dtos::{
    first_validation_message, normalize_folder, validate_folder, DeleteFileRequestDto,
    DeleteFileResponseDto, FileUrlRequestDto, PresignedUrlRequestDto, UploadFileDto,
    MAX_FILE_SIZE, PRESIGNED_ALLOWED_MIME_TYPES, PRESIGNED_FIELD_ORDER,
    UPLOAD_ALLOWED_MIME_TYPES,
};
use crate::features::storage::services::StorageService;
use crate::modules::storage::UploadFileResult;
use crate::shared::types::ErrorResponse;

/// Upload a file through the server
///
/// Accepts multipart/form-data with:
/// - `file`: The file to upload (required)
/// - `folder`: Folder to store the file in (optional)
#[utoipa::path(
    post,
    path = "/api/storage/upload",
    tag = "storage",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form with optional folder field",
    ),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadFileResult),
        (status = 400, description = "Missing file, file too large or unsupported type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(service): State<Arc<StorageService>>,
    mut multipart: Multipart,
) -> Result<Json<UploadFileResult>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut folder: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "folder" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read folder field: {}", e))
                })?;
                folder = normalize_folder(Some(text));
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "unnamed".to_string());
    let content_type = content_type.unwrap_or_default();

    if file_data.len() > MAX_FILE_SIZE {
        return Err(AppError::BadRequest(
            "File size exceeds the 10MB limit".to_string(),
        ));
    }

    if !UPLOAD_ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::BadRequest("File type not supported".to_string()));
    }

    if let Some(folder) = folder.as_deref() {
        validate_folder(folder)
            .map_err(|_| AppError::Validation("Invalid folder name".to_string()))?;
    }

    let result = service
        .upload_file(file_data, &file_name, &content_type, folder)
        .await?;

    Ok(Json(result))
}

/// Get a pre-signed URL for uploading directly to storage
#[utoipa::path(
    post,
    path = "/api/storage/presigned-url",
    tag = "storage",
    request_body = PresignedUrlRequestDto,
    responses(
        (status = 200, description = "Pre-signed PUT URL and the key it writes to", body = UploadFileResult),
        (status = 400, description = "Missing fields or unsupported type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_presigned_url(
    State(service): State<Arc<StorageService>>,
    AppJson(dto): AppJson<PresignedUrlRequestDto>,
) -> Result<Json<UploadFileResult>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(first_validation_message(&e, PRESIGNED_FIELD_ORDER)))?;

    if !PRESIGNED_ALLOWED_MIME_TYPES.contains(&dto.content_type.as_str()) {
        return Err(AppError::BadRequest("File type not supported".to_string()));
    }

    let result = service
        .get_presigned_upload_url(
            &dto.filename,
            &dto.content_type,
            normalize_folder(dto.folder),
            None,
        )
        .await?;

    Ok(Json(result))
}

/// Resolve the access URL for an uploaded file
///
/// Returns the public URL when one is configured, otherwise a fresh
/// signed URL valid for 7 days.
#[utoipa::path(
    post,
    path = "/api/storage/file-url",
    tag = "storage",
    request_body = FileUrlRequestDto,
    responses(
        (status = 200, description = "Access URL for the key", body = UploadFileResult),
        (status = 400, description = "Missing key", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_file_url(
    State(service): State<Arc<StorageService>>,
    AppJson(dto): AppJson<FileUrlRequestDto>,
) -> Result<Json<UploadFileResult>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(first_validation_message(&e, &["key"])))?;

    let result = service.get_file_url(&dto.key).await?;

    Ok(Json(result))
}

/// Delete a file by its key
#[utoipa::path(
    delete,
    path = "/api/storage/file",
    tag = "storage",
    request_body = DeleteFileRequestDto,
    responses(
        (status = 200, description = "File deleted (or already absent)", body = DeleteFileResponseDto),
        (status = 400, description = "Missing key", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(service): State<Arc<StorageService>>,
    AppJson(dto): AppJson<DeleteFileRequestDto>,
) -> Result<Json<DeleteFileResponseDto>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(first_validation_message(&e, &["key"])))?;

    service.delete_file(&dto.key).await?;

    Ok(Json(DeleteFileResponseDto {
        deleted: true,
        key: dto.key,
    }))
}
