//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io / serde_json error                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds entity/key context                     │
//! │       ▲                                                                 │
//! │       │                                                                 │
//! │  CoreError (sari-core)    ← business rule rejections pass through       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence-write failures are REAL errors here. The system this
//! replaces swallowed and logged them; this rewrite surfaces them to
//! the caller.

use sari_core::{CoreError, ValidationError};
use thiserror::Error;

/// Persistence and lookup errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found. Update/delete of a nonexistent id is an
    /// explicit error in this implementation, never a silent no-op.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Business rule rejection from sari-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying storage read/write failure.
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Blob could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
