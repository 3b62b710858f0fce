//! Persona authoring: CRUD, AI generation, refinement, resume export.

pub mod generate;
pub mod handlers;
pub mod prompts;
