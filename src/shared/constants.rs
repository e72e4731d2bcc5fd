/// Maximum size accepted by the proxied upload endpoint (10MB)
pub const MAX_PROXY_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Files at or above this size are uploaded through a pre-signed URL (10MB)
pub const PRESIGNED_UPLOAD_THRESHOLD: u64 = 10 * 1024 * 1024;

// =============================================================================
// API PATHS
// =============================================================================

pub const API_STORAGE_UPLOAD: &str = "/api/storage/upload";
pub const API_STORAGE_PRESIGNED_URL: &str = "/api/storage/presigned-url";
pub const API_STORAGE_FILE_URL: &str = "/api/storage/file-url";
pub const API_STORAGE_FILE: &str = "/api/storage/file";
