//! Item repository module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::forms::{errors::GetItemError, FieldMetadata, Item, ItemUri};

/// Item repository
#[async_trait]
pub trait ItemRepository: Clone + Send + Sync + 'static {
    /// Get the item behind a form field
    ///
    /// # Arguments
    /// * `field_id` - The identifier of the submitted field.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the [`Item`] if found,
    /// or an [`Err`] containing [`GetItemError::ItemNotFound`] if there is none.
    async fn get_item(&self, field_id: &str) -> Result<Item, GetItemError>;

    /// Get the item a media reference points at
    async fn get_item_by_uri(&self, uri: &ItemUri) -> Result<Item, GetItemError>;

    /// Derive the display metadata of a field item
    fn create_field_item(&self, item: &Item) -> FieldMetadata;
}

#[cfg(test)]
mock! {
    pub ItemRepository {}

    impl Clone for ItemRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ItemRepository for ItemRepository {
        async fn get_item(&self, field_id: &str) -> Result<Item, GetItemError>;
        async fn get_item_by_uri(&self, uri: &ItemUri) -> Result<Item, GetItemError>;
        fn create_field_item(&self, item: &Item) -> FieldMetadata;
    }
}
