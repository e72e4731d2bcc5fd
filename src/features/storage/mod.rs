pub mod client;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use client::{LocalFile, UploadClient, UploadClientError, UploadStrategy};
pub use routes::routes;
pub use services::StorageService;
