pub mod job;
pub mod job_match;
pub mod message;
pub mod persona;
pub mod post;
pub mod profile;
pub mod settings;
