//! Field value formatting

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::forms::FieldParameters;

use super::MessageType;

lazy_static! {
    static ref LINE_BREAK_REGEX: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
    static ref DIGIT_REGEX: Regex = Regex::new(r"\d").unwrap();
}

/// Derives the display string for one field.
///
/// Multi-line values get `<br/>` line breaks and secure hidden values have
/// their digits masked. Both only apply to HTML email; SMS and plain text
/// values are returned unchanged.
pub fn format_value(
    parameters: &FieldParameters,
    value: String,
    message_type: MessageType,
    is_body_html: bool,
) -> String {
    if message_type == MessageType::Sms || !is_body_html || parameters.is_empty() {
        return value;
    }

    let mut value = value;

    if parameters.is_multiline() {
        value = LINE_BREAK_REGEX.replace_all(&value, "<br/>").into_owned();
    }

    if parameters.is_secure_hidden() {
        value = DIGIT_REGEX.replace_all(&value, "*").into_owned();
    }

    value
}
