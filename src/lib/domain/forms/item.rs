//! Content items backing form fields

use serde::Deserialize;

/// A content item as returned by an [`ItemRepository`](super::ItemRepository)
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Item identifier, e.g. `{6C5D5A0D-2C21-4D4A-9E0B-1A2B3C4D5E6F}`
    pub id: String,

    /// Item name
    pub name: String,

    /// Display name, falls back to the name when empty
    #[serde(default)]
    pub display_name: String,
}

/// Display metadata for a form field, derived from its item
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Field identifier as it appears in tokens
    pub id: String,

    /// Field item name
    pub name: String,

    /// Label shown to the author, used by `[DisplayName]` tokens
    pub display_name: String,
}

impl From<&Item> for FieldMetadata {
    fn from(item: &Item) -> Self {
        let display_name = if item.display_name.is_empty() {
            item.name.clone()
        } else {
            item.display_name.clone()
        };

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            display_name,
        }
    }
}
