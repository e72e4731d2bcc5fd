//! Storage gateway
//!
//! File upload, deletion and URL signing on top of S3-compatible object
//! storage, exposed over HTTP, plus a client that picks between proxied and
//! pre-signed uploads.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
