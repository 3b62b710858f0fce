//! Job-persona matching: the scorer, the browse pipeline, and their handlers.

pub mod handlers;
pub mod pipeline;
pub mod scorer;
