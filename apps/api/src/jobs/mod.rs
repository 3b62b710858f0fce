//! Job posting administration.

pub mod handlers;
