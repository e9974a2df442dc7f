//! SMTP mail transport implementation

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{header::ContentType, Attachment as AttachmentPart, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials as SmtpCredentials,
        client::{Tls, TlsParameters},
    },
    Message, SmtpTransport, Transport,
};
use tracing::debug;

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Credentials, MailTransport, MailerError, OutgoingMessage, TransportSettings},
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port, 0 for the default
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "0")]
    pub port: u16,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// Upgrade the connection with STARTTLS
    #[clap(
        long = "smtp-enable-ssl",
        env = "SMTP_ENABLE_SSL",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub enable_ssl: bool,

    /// Verify the TLS certificate
    #[clap(
        long = "smtp-verify-tls",
        env = "SMTP_VERIFY_TLS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub verify_tls: bool,
}

impl From<&SMTPConfig> for TransportSettings {
    fn from(config: &SMTPConfig) -> Self {
        let credentials = config.username.as_ref().map(|username| {
            Credentials::new(username, config.password.as_deref().unwrap_or_default())
        });

        Self {
            host: config.host.clone(),
            port: config.port,
            enable_ssl: config.enable_ssl,
            credentials,
        }
    }
}

/// SMTP mailer
#[derive(Debug, Clone)]
pub struct SMTPMailer {
    verify_tls: bool,
}

impl Default for SMTPMailer {
    fn default() -> Self {
        Self { verify_tls: true }
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: &SMTPConfig) -> Self {
        Self {
            verify_tls: config.verify_tls,
        }
    }

    /// Build a transport for the given settings
    pub fn transport(&self, settings: &TransportSettings) -> Result<SmtpTransport> {
        let mut builder = if settings.enable_ssl {
            SmtpTransport::starttls_relay(&settings.host)?.tls(Tls::Required(
                TlsParameters::builder(settings.host.to_string())
                    .dangerous_accept_invalid_certs(!self.verify_tls)
                    .build()?,
            ))
        } else {
            SmtpTransport::builder_dangerous(&settings.host)
        };

        if settings.port != 0 {
            builder = builder.port(settings.port);
        }

        if let Some(credentials) = &settings.credentials {
            builder = builder.credentials(SmtpCredentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ));
        }

        Ok(builder.build())
    }
}

fn mailbox(address: &EmailAddress) -> Result<Mailbox, MailerError> {
    Ok(address.as_str().parse()?)
}

/// Convert a composed message into a MIME message
pub fn build_message(message: &OutgoingMessage) -> Result<Message, MailerError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone());

    for address in &message.to {
        builder = builder.to(mailbox(address)?);
    }
    for address in &message.cc {
        builder = builder.cc(mailbox(address)?);
    }
    for address in &message.bcc {
        builder = builder.bcc(mailbox(address)?);
    }

    let body = if message.is_body_html {
        SinglePart::html(message.body.clone())
    } else {
        SinglePart::plain(message.body.clone())
    };

    if message.attachments.is_empty() {
        return Ok(builder.singlepart(body)?);
    }

    let mut parts = MultiPart::mixed().singlepart(body);
    for attachment in &message.attachments {
        let content_type = ContentType::parse(&attachment.mime_type).map_err(|e| {
            anyhow!(
                "invalid MIME type \"{}\" for {}: {}",
                attachment.mime_type,
                attachment.filename,
                e
            )
        })?;

        parts = parts.singlepart(
            AttachmentPart::new(attachment.filename.clone())
                .body(attachment.content.clone(), content_type),
        );
    }

    Ok(builder.multipart(parts)?)
}

#[async_trait]
impl MailTransport for SMTPMailer {
    async fn send(
        &self,
        settings: &TransportSettings,
        message: &OutgoingMessage,
    ) -> Result<(), MailerError> {
        let email = build_message(message)?;

        debug!("connecting to {}:{}", settings.host, settings.port);

        match self.transport(settings)?.send(&email) {
            Ok(_) => Ok(()),
            Err(e) => Err(MailerError::UnknownError(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::mailer::Attachment;

    use super::*;

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            from: EmailAddress::new_unchecked("forms@example.com"),
            to: vec![EmailAddress::new_unchecked("owner@example.com")],
            cc: vec![
                EmailAddress::new_unchecked("a@x.com"),
                EmailAddress::new_unchecked("b@x.com"),
            ],
            bcc: vec![EmailAddress::new_unchecked("audit@x.com")],
            subject: "New submission".to_string(),
            body: "<p>Hello</p>".to_string(),
            is_body_html: true,
            attachments: vec![],
        }
    }

    #[test]
    fn test_build_message_envelope() -> TestResult {
        let email = build_message(&message())?;

        let envelope = email.envelope();
        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("forms@example.com".to_string())
        );
        assert_eq!(envelope.to().len(), 4);

        let formatted = String::from_utf8(email.formatted())?;
        assert!(formatted.contains("Subject: New submission"));
        assert!(formatted.contains("text/html"));
        assert!(!formatted.contains("audit@x.com"));

        Ok(())
    }

    #[test]
    fn test_build_plain_message() -> TestResult {
        let email = build_message(&OutgoingMessage {
            is_body_html: false,
            ..message()
        })?;

        let formatted = String::from_utf8(email.formatted())?;
        assert!(formatted.contains("text/plain"));

        Ok(())
    }

    #[test]
    fn test_build_message_with_attachment() -> TestResult {
        let email = build_message(&OutgoingMessage {
            attachments: vec![Attachment {
                content: b"hello".to_vec(),
                filename: "notes.txt".to_string(),
                mime_type: "text/plain".to_string(),
            }],
            ..message()
        })?;

        let formatted = String::from_utf8(email.formatted())?;
        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("notes.txt"));

        Ok(())
    }

    #[test]
    fn test_invalid_mime_type() {
        let result = build_message(&OutgoingMessage {
            attachments: vec![Attachment {
                content: vec![],
                filename: "x".to_string(),
                mime_type: "not a mime type".to_string(),
            }],
            ..message()
        });

        assert!(matches!(result, Err(MailerError::UnknownError(_))));
    }

    #[test]
    fn test_transport_settings_from_config() {
        let config = SMTPConfig {
            host: "smtp.example.com".to_string(),
            port: 2525,
            username: Some("mailer".to_string()),
            password: None,
            enable_ssl: true,
            verify_tls: true,
        };

        let settings = TransportSettings::from(&config);

        assert_eq!(settings.host, "smtp.example.com");
        assert_eq!(settings.port, 2525);
        assert!(settings.enable_ssl);
        assert_eq!(settings.credentials, Some(Credentials::new("mailer", "")));
    }

    #[test]
    fn test_transport_builds_without_connecting() -> TestResult {
        let mailer = SMTPMailer::default();

        mailer.transport(&TransportSettings {
            host: "localhost".to_string(),
            ..Default::default()
        })?;
        mailer.transport(&TransportSettings {
            host: "localhost".to_string(),
            port: 587,
            enable_ssl: true,
            credentials: Some(Credentials::new("user", "pass")),
        })?;

        Ok(())
    }
}
