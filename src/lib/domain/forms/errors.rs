//! Error types for form items

use thiserror::Error;

/// Errors that can occur when getting an item
#[derive(Debug, Error)]
pub enum GetItemError {
    /// Item not found
    #[error("item \"{0}\" not found")]
    ItemNotFound(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
