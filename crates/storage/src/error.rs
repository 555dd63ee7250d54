use thiserror::Error;

/// Errors that may occur while interacting with the relational store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to establish the database connection.
    #[error("connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// A query or insert failed.
    #[error("query error: {0}")]
    Query(#[from] diesel::result::Error),

    /// Running the embedded migrations failed.
    #[error("migration error: {0}")]
    Migration(String),
}
