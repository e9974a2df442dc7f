//! Mail transport module

mod errors;
mod message;
mod settings;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::{Attachment, OutgoingMessage};
pub use settings::{Credentials, TransportSettings};

/// Mail transport
#[async_trait]
pub trait MailTransport: Clone + Send + Sync + 'static {
    /// Send a composed message
    ///
    /// # Arguments
    /// * `settings` - Host, port, TLS and credentials to connect with.
    /// * `message` - The fully composed [`OutgoingMessage`].
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send(
        &self,
        settings: &TransportSettings,
        message: &OutgoingMessage,
    ) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    impl Clone for MailTransport {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailTransport for MailTransport {
        async fn send(&self, settings: &TransportSettings, message: &OutgoingMessage) -> Result<(), MailerError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockMailTransport;
}
