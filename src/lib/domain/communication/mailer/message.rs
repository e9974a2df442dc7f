//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// A file attached to a message
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File contents
    pub content: Vec<u8>,

    /// File name, `name.extension`
    pub filename: String,

    /// MIME type, e.g. `application/pdf`
    pub mime_type: String,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// A fully composed message, ready for a transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// The sender of the email
    pub from: EmailAddress,

    /// The recipients of the email
    pub to: Vec<EmailAddress>,

    /// Carbon copy recipients
    pub cc: Vec<EmailAddress>,

    /// Blind carbon copy recipients
    pub bcc: Vec<EmailAddress>,

    /// The subject of the email
    pub subject: String,

    /// The body of the email
    pub body: String,

    /// Whether the body is HTML
    pub is_body_html: bool,

    /// Attachments in collection order
    pub attachments: Vec<Attachment>,
}
