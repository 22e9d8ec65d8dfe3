//! Collaborators that feed the renderer and receive its output.
//!
//! All I/O sits behind the port traits in [`ports`]:
//! - [`RecipeSource`](ports::RecipeSource) - produce a validated recipe
//! - [`BatchSource`](ports::BatchSource) - list batches and fetch one with its notes
//! - [`DocumentSink`](ports::DocumentSink) - write the finished document
//!
//! [`adapters`] holds the filesystem and in-memory implementations; [`brewfather`] talks to the
//! Brewfather v2 API. Nothing here retries, paginates or caches.

pub mod adapters;
pub mod brewfather;
mod error;
mod lookup;
pub mod ports;

pub use error::SourceError;
pub use lookup::find_batch_id;
