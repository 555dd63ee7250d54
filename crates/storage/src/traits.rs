use crate::StorageError;
use scribe_types::{Block, Validator};
use std::fmt::Debug;

/// Read and insert access to stored validators.
///
/// Lookups distinguish a miss (`Ok(None)`) from a failed query (`Err`);
/// whether a failure is degraded to a miss is the caller's decision, not the
/// repository's.
pub trait ValidatorStore: Debug + Send + Sync {
    /// Point lookup by validator index.
    fn validator_by_index(&self, index: u64) -> Result<Option<Validator>, StorageError>;

    /// Highest stored validator index, or `None` when the table is empty.
    fn max_validator_index(&self) -> Result<Option<u64>, StorageError>;

    /// Persists a validator. Insert-only: an existing row for the same
    /// index wins and the new value is dropped.
    fn insert_validator(&self, validator: &Validator) -> Result<(), StorageError>;
}

/// Read and insert access to stored blocks.
pub trait BlockStore: Debug + Send + Sync {
    /// Point lookup by slot.
    fn block_by_slot(&self, slot: u64) -> Result<Option<Block>, StorageError>;

    /// Highest stored slot, or `None` when the table is empty.
    fn max_slot(&self) -> Result<Option<u64>, StorageError>;

    /// Highest stored block timestamp, or `None` when the table is empty.
    fn max_timestamp(&self) -> Result<Option<i64>, StorageError>;

    /// Persists a block record, missed slots included. Insert-only, keyed
    /// by slot.
    fn insert_block(&self, block: &Block) -> Result<(), StorageError>;
}
