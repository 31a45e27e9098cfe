//! Store operations per slice.

mod agents;
mod auth;
mod models;
mod prompts;
mod tools;
mod triggers;

pub use auth::LOGIN_FAILED;
