//! Error types for the message pipeline

use thiserror::Error;
use tracing::debug;

use crate::domain::{
    communication::{email_addresses::EmailAddressError, mailer::MailerError, media::MediaError},
    forms::errors::GetItemError,
};

/// Errors in the pipeline's own configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No server URL to build absolute links from
    #[error("a server URL is required to build absolute links")]
    MissingServerUrl,
}

/// Errors that can occur when composing a message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// The sender address is not a valid email address
    #[error("The email message was not sent. The email address specified in the \"From\" parameter is not valid.")]
    InvalidSender(String),

    /// A recipient address is not a valid email address
    #[error("The email message was not sent. The recipient address \"{0}\" is not valid.")]
    InvalidRecipient(String),

    /// There is nobody to send the message to
    #[error("The email message was not sent. No recipients were specified.")]
    NoRecipients,
}

impl From<EmailAddressError> for ComposeError {
    fn from(err: EmailAddressError) -> Self {
        debug!("EmailAddressError -> ComposeError");

        match err {
            EmailAddressError::EmptyEmailAddress => ComposeError::InvalidRecipient(String::new()),
            EmailAddressError::InvalidEmailAddress(raw) => ComposeError::InvalidRecipient(raw),
        }
    }
}

/// Errors that abort processing of a message
#[derive(Debug, Error)]
pub enum ProcessMessageError {
    /// The message could not be composed
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The item repository failed
    #[error(transparent)]
    Repository(#[from] GetItemError),

    /// Media could not be read
    #[error(transparent)]
    Media(#[from] MediaError),

    /// The transport failed to send the message
    #[error(transparent)]
    Transport(#[from] MailerError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
