//! User-to-user chat with persona auto-replies.

pub mod handlers;
pub mod prompts;
