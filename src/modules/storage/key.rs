//! Object key generation
//!
//! Keys have the shape `[<folder>/]<uuid>[.<ext>]`. The random identifier makes
//! them unique per upload regardless of the original filename.

use uuid::Uuid;

/// Extension of a filename: the last dot-segment of its final path component
///
/// `None` if there is none or if it holds anything but ASCII alphanumerics.
pub fn file_extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Build a fresh object key for an upload of `filename`
pub fn generate_object_key(filename: &str, folder: Option<&str>) -> String {
    let id = Uuid::new_v4();
    let unique_filename = match file_extension(filename) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    };

    match folder.filter(|f| !f.is_empty()) {
        Some(folder) => format!("{}/{}", folder, unique_filename),
        None => unique_filename,
    }
}
