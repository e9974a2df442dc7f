//! Default field value adaptation

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::forms::FieldProvider;

lazy_static! {
    static ref LIST_ITEM_REGEX: Regex = Regex::new(r"(?s)<item>(.*?)</item>").unwrap();
}

/// Renders multi-valued answers (`<item>a</item><item>b</item>`) as `a, b`
/// and passes every other value through unchanged.
#[derive(Clone, Debug, Default)]
pub struct DefaultFieldProvider;

impl FieldProvider for DefaultFieldProvider {
    fn get_adapted_value(&self, _field_id: &str, value: &str) -> String {
        if !value.contains("<item>") {
            return value.to_string();
        }

        LIST_ITEM_REGEX
            .captures_iter(value)
            .map(|captures| captures[1].trim().to_string())
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
