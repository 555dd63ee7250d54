use scribe_client::ClientError;
use scribe_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the reconciliation engine.
///
/// Storage failures on the resolve path never reach this type: reads
/// degrade to cache misses and writes are logged and swallowed. What does
/// propagate is an upstream fetch failure, or a storage failure while
/// seeding the cursors at startup.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// An upstream fetch failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Reading the storage high-water marks failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ReconcileError {
    /// Whether retrying the same step can possibly help.
    ///
    /// A malformed success body means the upstream is speaking a different
    /// protocol; the loop halts on it instead of retrying forever.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Client(ClientError::Decode(_)))
    }
}
