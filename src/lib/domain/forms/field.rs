//! Submitted field

use serde::Deserialize;

const MULTIPLE_LINE: &str = "multipleline";
const SECURE: &str = "secure";
const SECURE_HIDDEN_MARKER: &str = "<schidden>";
const MEDIA_LINK: &str = "medialink";

/// Formatting hints attached to a submitted field, e.g. `multipleline` or
/// `secure;<schidden>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldParameters(String);

impl FieldParameters {
    /// Create parameters from their raw encoded form
    pub fn new(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// The raw encoded parameters
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether there are no parameters at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Line breaks in the value should be rendered as `<br/>`
    pub fn is_multiline(&self) -> bool {
        self.has_flag(MULTIPLE_LINE)
    }

    /// Digits in the value should be masked
    pub fn is_secure_hidden(&self) -> bool {
        self.has_flag(SECURE) && self.0.contains(SECURE_HIDDEN_MARKER)
    }

    /// The value is a reference to a media item
    pub fn is_media_link(&self) -> bool {
        self.has_flag(MEDIA_LINK)
    }

    fn has_flag(&self, keyword: &str) -> bool {
        self.0.starts_with(keyword)
            || self
                .0
                .split(';')
                .any(|segment| segment.trim_start().starts_with(keyword))
    }
}

/// One answer captured from a form submission
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SubmittedField {
    /// Identifier of the field item
    pub field_id: String,

    /// Internal name of the field
    #[serde(default)]
    pub field_name: String,

    /// Raw submitted value
    #[serde(default)]
    pub value: String,

    /// Formatting hints
    #[serde(default)]
    pub parameters: FieldParameters,
}

impl SubmittedField {
    /// Create a submitted field
    pub fn new(field_id: &str, field_name: &str, value: &str, parameters: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            field_name: field_name.to_string(),
            value: value.to_string(),
            parameters: FieldParameters::new(parameters),
        }
    }
}

/// Returns the raw value of the field with the given identifier, or an empty
/// string if there is none.
pub(crate) fn value_by_field_id<'a>(fields: &'a [SubmittedField], field_id: &str) -> &'a str {
    fields
        .iter()
        .find(|field| field.field_id == field_id)
        .map(|field| field.value.as_str())
        .unwrap_or_default()
}
