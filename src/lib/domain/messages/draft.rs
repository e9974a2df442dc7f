//! Message in progress

use serde::Deserialize;

use crate::domain::communication::mailer::{Attachment, TransportSettings};

/// Kind of notification being composed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Email, HTML or plain text
    #[default]
    Email,

    /// SMS delivered through an email gateway
    Sms,
}

/// A message being assembled by the pipeline. Every stage mutates it in place.
#[derive(Clone, Debug, Default)]
pub struct MessageDraft {
    /// Message body, rich text
    pub body: String,

    /// Subject line
    pub subject: String,

    /// Sender address
    pub from: String,

    /// `,` or `;` delimited recipients
    pub to: String,

    /// `,` or `;` delimited carbon copy recipients
    pub cc: String,

    /// `,` or `;` delimited blind carbon copy recipients
    pub bcc: String,

    /// Collected attachments
    pub attachments: Vec<Attachment>,

    /// Whether the body is HTML
    pub is_body_html: bool,

    /// Email or SMS
    pub message_type: MessageType,

    /// Attach media referenced by `medialink` fields
    pub include_attachment: bool,

    /// Where to send the message from
    pub transport: TransportSettings,

    /// Identifier of the field holding the recipient, e.g. a phone number
    pub recipient: String,

    /// Suffix appended to the recipient field's value, e.g. `@sms.example.com`
    pub recipient_gateway: String,
}

impl MessageDraft {
    /// Whether this is an SMS message
    pub fn is_sms(&self) -> bool {
        self.message_type == MessageType::Sms
    }
}
