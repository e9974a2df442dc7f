//! Concrete collaborators: SMTP delivery, a JSON item catalog and field values.

pub mod catalog;
pub mod email;
pub mod fields;
