//! # Lexio Client
//!
//! A Rust client for the Lexio localization API: projects, translation keys,
//! locales and translations behind a resource-oriented HTTP/JSON interface
//! that paginates large collections via the `Link` response header.
//!
//! The heart of the crate is the paginated retrieval engine:
//!
//! - **Request executor**: one HTTP exchange with retry/backoff on
//!   transient failures, response classification and JSON decoding
//! - **Link navigator**: RFC 5988 `Link` header parsing into a structured
//!   first/prev/next/last set
//! - **Aggregator**: eager traversal collecting every page in order
//! - **Record stream**: lazy, pull-based traversal emitting one record at a
//!   time with running progress
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use lexio_client::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> lexio_client::Result<()> {
//!     let client = ApiClient::new("my-access-token");
//!
//!     // Bulk: every key of a project, all pages merged
//!     let keys = client.project("my-project").list_keys().await?;
//!
//!     // Streaming: one record at a time with progress
//!     let mut stream = client.project("my-project").list_translations_stream()?;
//!     while let Some(envelope) = stream.next().await {
//!         let envelope = envelope?;
//!         println!("{}/{:?}: {}", envelope.progress.current, envelope.progress.total, envelope.data);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            ApiClient / ProjectScope                     │
//! │   endpoint table → call / call_all / call_stream        │
//! └───────────────┬─────────────────────────┬───────────────┘
//!                 │                         │
//!        ┌────────┴────────┐      ┌─────────┴─────────┐
//!        │   fetch_all     │      │   RecordStream    │
//!        │   (eager)       │      │   (lazy, pull)    │
//!        └────────┬────────┘      └─────────┬─────────┘
//!                 │     LinkSet (Link hdr)  │
//!        ┌────────┴─────────────────────────┴───────────┐
//!        │   RequestExecutor: retry · backoff · decode  │
//!        └──────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication header construction
pub mod auth;

/// Request execution with retry, backoff and rate limiting
pub mod http;

/// Paginated retrieval: link parsing, aggregation, streaming
pub mod pagination;

/// Path template rendering
pub mod template;

/// Resource surface: endpoint table, client, project scope
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{ApiClient, ProjectScope};
pub use auth::AuthConfig;
pub use error::{Error, Result};
pub use http::{Decoded, ExecutorConfig, RequestExecutor, RequestOptions, ResponseEnvelope};
pub use pagination::{fetch_all, LinkSet, PageLink, Progress, RecordEnvelope, RecordStream};
pub use types::{BackoffType, Method};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
