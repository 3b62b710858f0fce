//! User profiles.

pub mod handlers;
