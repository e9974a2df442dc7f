//! Message composer

use tracing::warn;

use crate::domain::communication::{email_addresses::EmailAddress, mailer::OutgoingMessage};

use super::{errors::ComposeError, MessageDraft};

fn normalize_delimiters(raw: &str) -> String {
    raw.replace(';', ",")
}

fn recipients(raw: &str) -> Result<Vec<EmailAddress>, ComposeError> {
    EmailAddress::parse_list(&normalize_delimiters(raw)).map_err(|e| {
        warn!("invalid recipient: {}", e);
        e.into()
    })
}

/// Validates the draft's addresses and assembles the message to send.
///
/// On success the draft's attachments are moved into the message. On failure
/// the draft is left untouched.
///
/// # Errors
/// - [`ComposeError::InvalidSender`] if `from` is not a single valid address.
/// - [`ComposeError::InvalidRecipient`] if any `to`, `cc` or `bcc` segment is
///   not a valid address, including an empty segment in a non-blank list.
/// - [`ComposeError::NoRecipients`] if `to` is blank.
pub fn compose(draft: &mut MessageDraft) -> Result<OutgoingMessage, ComposeError> {
    // A valid sender never contains `;`, so it needs no normalizing.
    let from = EmailAddress::new(&draft.from).map_err(|e| {
        warn!("invalid sender: {}", e);
        ComposeError::InvalidSender(draft.from.clone())
    })?;

    let to = recipients(&draft.to)?;
    if to.is_empty() {
        return Err(ComposeError::NoRecipients);
    }

    let cc = recipients(&draft.cc)?;
    let bcc = recipients(&draft.bcc)?;

    Ok(OutgoingMessage {
        from,
        to,
        cc,
        bcc,
        subject: draft.subject.clone(),
        body: draft.body.clone(),
        is_body_html: draft.is_body_html,
        attachments: std::mem::take(&mut draft.attachments),
    })
}
