//! Community feed: posts and their moderation lifecycle.

pub mod handlers;
