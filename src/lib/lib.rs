#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Form notification mailer
//!
//! Composes email and SMS notifications from templates containing field
//! tokens, resolves them against submitted form values and dispatches the
//! result over SMTP.

pub mod domain;
pub mod infrastructure;
