//! Error type for the fallible edges of the crate: project JSON, replay
//! scripts, and configuration.
//!
//! Store and controller operations never fail; id misses are no-ops.

use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    ConfigParse(String),
    #[error("invalid project: {0}")]
    InvalidProject(String),
    #[error("duplicate element id {id} on page {page}")]
    DuplicateElementId { page: usize, id: Uuid },
    #[error("invalid script event {index}: {message}")]
    InvalidScript { index: usize, message: String },
}
