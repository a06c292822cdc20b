//! SQLite backend for the Sente participant store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Participants are stored
//! document-style: the public fields live in a JSON payload column, with
//! the confirmation fields lifted into real columns for querying.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
