//! Terminal client for the civic transparency API.
//!
//! Fetches each collection once and does all filtering and arithmetic
//! locally, the same way the web front end does.

pub mod api;
pub mod render;
pub mod state;
pub mod utils;

pub use api::{ApiClient, ClientError, DEFAULT_API_URL};

#[cfg(test)]
pub(crate) mod fixtures;
