//! Media store module

mod errors;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::forms::Item;

pub use errors::MediaError;

/// Binary content and metadata of a media item
#[derive(Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Media item name
    pub name: String,

    /// File extension without the dot
    pub extension: String,

    /// MIME type
    pub mime_type: String,

    /// Media blob
    pub content: Vec<u8>,
}

impl MediaItem {
    /// File name used when attaching the media, `name.extension`
    pub fn filename(&self) -> String {
        [self.name.as_str(), self.extension.as_str()].join(".")
    }
}

impl std::fmt::Debug for MediaItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaItem")
            .field("name", &self.name)
            .field("extension", &self.extension)
            .field("mime_type", &self.mime_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// Media store
#[async_trait]
pub trait MediaStore: Clone + Send + Sync + 'static {
    /// Fetch the media behind an item
    ///
    /// # Returns
    /// - [`Ok`] with the [`MediaItem`] if the item has media.
    /// - [`Err`] with [`MediaError::NotMedia`] if it does not, or
    ///   [`MediaError::UnknownError`] if the blob could not be read.
    async fn get_media(&self, item: &Item) -> Result<MediaItem, MediaError>;
}

#[cfg(test)]
mock! {
    pub MediaStore {}

    impl Clone for MediaStore {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MediaStore for MediaStore {
        async fn get_media(&self, item: &Item) -> Result<MediaItem, MediaError>;
    }
}
