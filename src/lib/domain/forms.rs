//! Submitted form fields and the items that describe them.

mod field;
mod item;
mod item_uri;
mod provider;
mod repository;

pub mod errors;

pub use field::{FieldParameters, SubmittedField};
pub(crate) use field::value_by_field_id;
pub use item::{FieldMetadata, Item};
pub use item_uri::ItemUri;
pub use provider::FieldProvider;
pub use repository::ItemRepository;
