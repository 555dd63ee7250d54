use scribe_storage::{BlockStore, StorageError, ValidatorStore};

/// The loop's resumption state, derived from storage high-water marks.
///
/// There is no separate checkpoint record: what is durably stored *is* the
/// checkpoint. Both cursors advance monotonically and are never persisted
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursors {
    /// The next validator index to probe for.
    pub next_validator_index: u64,
    /// The next slot to ingest.
    pub next_slot: u64,
}

impl Cursors {
    /// Seeds both cursors one past the stored maxima, or at zero for an
    /// empty store.
    pub fn seed<S>(store: &S) -> Result<Self, StorageError>
    where
        S: ValidatorStore + BlockStore,
    {
        let next_validator_index = store.max_validator_index()?.map_or(0, |max| max + 1);
        let next_slot = store.max_slot()?.map_or(0, |max| max + 1);
        Ok(Self { next_validator_index, next_slot })
    }
}
