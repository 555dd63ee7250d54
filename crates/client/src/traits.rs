use crate::{BlockMessage, ClientError};
use async_trait::async_trait;
use scribe_types::Validator;
use std::fmt::Debug;

/// Read access to the beacon-node endpoints the indexer consumes.
///
/// `Ok(None)` means the upstream answered 404: the resource legitimately
/// does not exist at the queried slot. Implementations must not retry;
/// retry policy belongs to the reconciliation loop.
#[async_trait]
pub trait BeaconApi: Debug + Send + Sync {
    /// Fetches the block proposed at `slot`, or `None` if the slot was
    /// missed.
    async fn block_at_slot(&self, slot: u64) -> Result<Option<BlockMessage>, ClientError>;

    /// Fetches the validator at `index` from the chain state at `slot`, or
    /// `None` if the index is not known to that state.
    async fn validator_at_slot(
        &self,
        slot: u64,
        index: u64,
    ) -> Result<Option<Validator>, ClientError>;
}
