//! Outbound communication: addresses, transports, links and media.

pub mod email_addresses;
pub mod links;
pub mod mailer;
pub mod media;
