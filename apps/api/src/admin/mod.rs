//! Administration: the role gate, post moderation, and global AI settings.

pub mod handlers;
pub mod settings;
