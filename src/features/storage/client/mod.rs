mod upload_client;

pub use upload_client::{LocalFile, UploadClient, UploadClientError, UploadStrategy};
