//! Media errors

use thiserror::Error;

/// Errors that can occur when fetching media
#[derive(Debug, Error)]
pub enum MediaError {
    /// The item carries no media
    #[error("item \"{0}\" is not a media item")]
    NotMedia(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
