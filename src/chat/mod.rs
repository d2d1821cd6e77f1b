//! Chat relay for the ChatEch server
//!
//! Forwards authenticated prompts to the completion service and keeps each
//! user's exchange history.

pub mod handlers;
mod service;

pub use service::{ChatReply, ChatService};
