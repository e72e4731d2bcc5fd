//! Features layer - HTTP-facing functionality grouped by domain

pub mod storage;
