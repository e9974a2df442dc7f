//! Domain types, collaborator traits and the message pipeline.

pub mod communication;
pub mod forms;
pub mod messages;
