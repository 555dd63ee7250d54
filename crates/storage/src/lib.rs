//! Postgres-backed repositories for the scribe indexer.
//!
//! Both tables are insert-only with first-write-wins semantics per key:
//! inserts use `ON CONFLICT DO NOTHING` and nothing is ever updated or
//! deleted. Lookups report `Result<Option<T>, StorageError>` so callers can
//! tell a miss from a failed query and decide the fallback themselves.

mod error;
pub use error::StorageError;

mod traits;
pub use traits::{BlockStore, ValidatorStore};

/// Diesel table definitions for the owned schema.
pub mod schema;

mod models;

mod database;
pub use database::{Database, MIGRATIONS};
