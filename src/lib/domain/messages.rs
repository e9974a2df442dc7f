//! Message pipeline: turns a template and submitted fields into a sent message.

mod attachments;
mod composer;
mod draft;
mod formatter;
mod links;
mod recipient;
mod sanitizer;
mod service;
mod tokens;

pub mod errors;

pub use attachments::collect_attachments;
pub use composer::compose;
pub use draft::{MessageDraft, MessageType};
pub use formatter::format_value;
pub use links::{expand_dynamic_links, HostUrls};
pub use recipient::build_to_from_recipient;
pub use sanitizer::{rewrite_theme_paths, sanitize, strip_event_handlers};
pub use service::{MessageProcessor, MessageProcessorImpl};
