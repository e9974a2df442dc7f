//! Submission file

use std::path::Path;

use anyhow::{Context, Result};
use form_mailer::domain::{
    communication::mailer::TransportSettings,
    forms::SubmittedField,
    messages::{MessageDraft, MessageType},
};
use serde::Deserialize;

/// A notification template together with the form answers to fill it with
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Submission {
    /// Email or SMS
    pub message_type: MessageType,

    /// Whether the body is HTML
    pub is_body_html: bool,

    /// Attach media referenced by `medialink` fields
    pub include_attachment: bool,

    /// Sender address or token
    pub from: String,

    /// Recipients or tokens
    pub to: String,

    /// Carbon copy recipients or tokens
    pub cc: String,

    /// Blind carbon copy recipients
    pub bcc: String,

    /// Subject template
    pub subject: String,

    /// Body template
    pub body: String,

    /// Identifier of the field holding the recipient
    pub recipient: String,

    /// Suffix appended to the recipient field's value
    pub recipient_gateway: String,

    /// Submitted form fields
    pub fields: Vec<SubmittedField>,
}

impl Submission {
    /// Read a submission from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read submission {}", path.display()))?;

        serde_json::from_str(&json).context("failed to parse submission")
    }

    /// Split into the draft to process and the fields to resolve it with
    pub fn into_draft(self, transport: TransportSettings) -> (MessageDraft, Vec<SubmittedField>) {
        let draft = MessageDraft {
            body: self.body,
            subject: self.subject,
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            attachments: Vec::new(),
            is_body_html: self.is_body_html,
            message_type: self.message_type,
            include_attachment: self.include_attachment,
            transport,
            recipient: self.recipient,
            recipient_gateway: self.recipient_gateway,
        };

        (draft, self.fields)
    }
}
