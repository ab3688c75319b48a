//! Resource surface of the Lexio API
//!
//! Declarative glue over the retrieval engine: an endpoint table, a client
//! that dispatches through it, and a capability struct for project-scoped
//! operations.

mod client;
mod endpoints;
mod project;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use endpoints::{endpoint, Endpoint, ENDPOINTS};
pub use project::ProjectScope;

#[cfg(test)]
mod tests;
