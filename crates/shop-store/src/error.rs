//! Error types shared by the product and cart stores.

use collection_actor::{FrameworkError, StorageError};
use thiserror::Error;

/// Errors that can occur during product and cart operations.
///
/// Entity hooks raise this type directly. The actor framework carries it boxed and
/// each client recovers it in [`StoreError::from_framework`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// One or more input fields are missing or out of bounds.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The requested record (or a line item inside a cart) does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The collection file could not be read or written.
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// The collection file exists but does not hold a valid collection.
    #[error("Corrupt collection file: {0}")]
    Parse(String),

    /// The store itself is unavailable (actor gone, task failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(vec![message.into()])
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Translates a framework failure from the actor serving `resource`.
    pub fn from_framework(resource: &'static str, e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => StoreError::NotFound { resource, id },
            FrameworkError::Storage(StorageError::Io { .. }) => StoreError::Io(e.to_string()),
            FrameworkError::Storage(StorageError::Parse { .. } | StorageError::Encode { .. }) => {
                StoreError::Parse(e.to_string())
            }
            FrameworkError::Storage(StorageError::Task(_))
            | FrameworkError::ActorClosed
            | FrameworkError::ActorDropped => StoreError::Internal(e.to_string()),
            e @ FrameworkError::EntityError(_) => match e.into_entity_error::<StoreError>() {
                Ok(store_error) => store_error,
                Err(other) => StoreError::Internal(other.to_string()),
            },
        }
    }
}
