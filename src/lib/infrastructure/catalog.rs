//! JSON item catalog
//!
//! A small, read-only content store loaded from a JSON document. It resolves
//! field items, item URIs, dynamic links and media blobs for the message
//! pipeline.
//!
//! ```json
//! [
//!   { "id": "{...}", "name": "email", "display_name": "Email Address" },
//!   { "id": "{...}", "name": "privacy", "url": "/privacy-policy" },
//!   { "id": "{...}", "name": "cv", "path": "/sitecore/media library/cv",
//!     "media": { "file": "cv.pdf", "extension": "pdf", "mime_type": "application/pdf" } }
//! ]
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    communication::{
        links::LinkResolver,
        media::{MediaError, MediaItem, MediaStore},
    },
    forms::{errors::GetItemError, FieldMetadata, Item, ItemRepository, ItemUri},
};

lazy_static! {
    static ref DYNAMIC_LINK_REGEX: Regex =
        Regex::new(r"~/link\.aspx\?_id=(?P<id>[0-9A-Fa-f]{32})(?:(?:&amp;|&)_z=z)?").unwrap();
}

/// Media blob stored next to the catalog
#[derive(Clone, Debug, Deserialize)]
pub struct MediaEntry {
    /// File path, relative to the catalog
    pub file: PathBuf,

    /// File extension without the dot
    pub extension: String,

    /// MIME type
    pub mime_type: String,
}

/// One item in the catalog
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogEntry {
    /// The item itself
    #[serde(flatten)]
    pub item: Item,

    /// Content path, used by path based item URIs
    #[serde(default)]
    pub path: Option<String>,

    /// Public URL dynamic links to this item expand to
    #[serde(default)]
    pub url: Option<String>,

    /// Media blob, if this is a media item
    #[serde(default)]
    pub media: Option<MediaEntry>,
}

/// Items loaded from a JSON document
#[derive(Clone, Debug, Default)]
pub struct JsonCatalog {
    entries: Arc<Vec<CatalogEntry>>,
    base_dir: PathBuf,
}

/// Reduces `{6C5D5A0D-2C21-...}` and `6C5D5A0D2C21...` to the same key
fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl JsonCatalog {
    /// Parse a catalog. Media files are resolved relative to `base_dir`.
    pub fn from_json(json: &str, base_dir: &Path) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).context("failed to parse item catalog")?;

        Ok(Self {
            entries: Arc::new(entries),
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Load a catalog from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read item catalog {}", path.display()))?;

        Self::from_json(&json, path.parent().unwrap_or_else(|| Path::new(".")))
    }

    fn find_by_id(&self, id: &str) -> Option<&CatalogEntry> {
        let key = normalize_id(id);
        if key.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| normalize_id(&entry.item.id) == key)
    }

    fn find_by_path(&self, path: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| {
            entry
                .path
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case(path))
        })
    }
}

#[async_trait]
impl ItemRepository for JsonCatalog {
    async fn get_item(&self, field_id: &str) -> Result<Item, GetItemError> {
        self.find_by_id(field_id)
            .map(|entry| entry.item.clone())
            .ok_or_else(|| GetItemError::ItemNotFound(field_id.to_string()))
    }

    async fn get_item_by_uri(&self, uri: &ItemUri) -> Result<Item, GetItemError> {
        let entry = if uri.is_id() {
            self.find_by_id(&uri.path)
        } else {
            self.find_by_path(&uri.path)
        };

        entry
            .map(|entry| entry.item.clone())
            .ok_or_else(|| GetItemError::ItemNotFound(uri.to_string()))
    }

    fn create_field_item(&self, item: &Item) -> FieldMetadata {
        FieldMetadata::from(item)
    }
}

impl LinkResolver for JsonCatalog {
    fn expand_dynamic_links(&self, text: &str) -> String {
        DYNAMIC_LINK_REGEX
            .replace_all(text, |captures: &Captures<'_>| {
                match self
                    .find_by_id(&captures["id"])
                    .and_then(|entry| entry.url.as_deref())
                {
                    Some(url) => url.to_string(),
                    None => {
                        debug!("no url for dynamic link {}", &captures["id"]);
                        captures[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}

#[async_trait]
impl MediaStore for JsonCatalog {
    async fn get_media(&self, item: &Item) -> Result<MediaItem, MediaError> {
        let media = self
            .find_by_id(&item.id)
            .and_then(|entry| entry.media.as_ref())
            .ok_or_else(|| MediaError::NotMedia(item.id.clone()))?;

        let file = self.base_dir.join(&media.file);
        let content = tokio::fs::read(&file)
            .await
            .with_context(|| format!("failed to read media {}", file.display()))?;

        Ok(MediaItem {
            name: item.name.clone(),
            extension: media.extension.clone(),
            mime_type: media.mime_type.clone(),
            content,
        })
    }
}
