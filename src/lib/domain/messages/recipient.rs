//! Recipient builder

use tracing::debug;

use crate::domain::forms::{value_by_field_id, SubmittedField};

use super::MessageDraft;

/// Replaces `to` with the recipient field's value plus the gateway suffix,
/// e.g. a phone number turned into an SMS gateway address. Does nothing
/// unless both the recipient field and the gateway are set.
pub fn build_to_from_recipient(draft: &mut MessageDraft, fields: &[SubmittedField]) {
    if draft.recipient.is_empty() || draft.recipient_gateway.is_empty() {
        return;
    }

    debug!("building recipient from field {}", draft.recipient);

    let value = value_by_field_id(fields, &draft.recipient);
    draft.to = format!("{}{}", value, draft.recipient_gateway);
}
