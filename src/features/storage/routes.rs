use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::features::storage::dtos::MAX_FILE_SIZE;
use crate::features::storage::handlers::{
    delete_file, get_file_url, get_presigned_url, upload_file,
};
use crate::features::storage::services::StorageService;
use crate::shared::constants::{
    API_STORAGE_FILE, API_STORAGE_FILE_URL, API_STORAGE_PRESIGNED_URL, API_STORAGE_UPLOAD,
};

/// Create routes for the storage feature
pub fn routes(storage_service: Arc<StorageService>) -> Router {
    Router::new()
        .route(
            API_STORAGE_UPLOAD,
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            post(upload_file).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route(API_STORAGE_PRESIGNED_URL, post(get_presigned_url))
        .route(API_STORAGE_FILE_URL, post(get_file_url))
        .route(API_STORAGE_FILE, delete(delete_file))
        .with_state(storage_service)
}
