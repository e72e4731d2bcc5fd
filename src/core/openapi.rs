use utoipa::{Modify, OpenApi};

use crate::features::storage::{dtos as storage_dtos, handlers as storage_handlers};
use crate::modules::storage::UploadFileResult;
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Storage
        storage_handlers::upload_file,
        storage_handlers::get_presigned_url,
        storage_handlers::get_file_url,
        storage_handlers::delete_file,
    ),
    components(
        schemas(
            ErrorResponse,
            UploadFileResult,
            storage_dtos::UploadFileDto,
            storage_dtos::PresignedUrlRequestDto,
            storage_dtos::FileUrlRequestDto,
            storage_dtos::DeleteFileRequestDto,
            storage_dtos::DeleteFileResponseDto,
        )
    ),
    tags(
        (name = "storage", description = "File upload, deletion and URL signing"),
    ),
    info(
        title = "Storage Gateway API",
        version = "0.1.0",
        description = "File upload and URL signing for S3-compatible storage",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
