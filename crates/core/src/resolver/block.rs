use crate::Metrics;
use scribe_client::{BeaconApi, ClientError};
use scribe_storage::BlockStore;
use scribe_types::Block;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Resolves blocks storage-first; a slot always yields a record.
///
/// A 404 from the upstream means the slot was missed and is mapped to a
/// synthetic record with proposer index `0`, persisted exactly like a
/// proposed block.
#[derive(Debug)]
pub struct BlockResolver<S, C> {
    store: Arc<S>,
    client: Arc<C>,
}

impl<S, C> BlockResolver<S, C>
where
    S: BlockStore,
    C: BeaconApi,
{
    /// Creates a new [`BlockResolver`].
    pub const fn new(store: Arc<S>, client: Arc<C>) -> Self {
        Self { store, client }
    }

    /// Returns the block record for `slot`, fetching and persisting it on
    /// a cache miss.
    ///
    /// The record's timestamp is always derived from the slot number; a
    /// timestamp carried by the payload is ignored.
    pub async fn resolve(&self, slot: u64) -> Result<Block, ClientError> {
        match self.store.block_by_slot(slot) {
            Ok(Some(block)) => return Ok(block),
            Ok(None) => {}
            Err(err) => {
                warn!(target: "block_resolver", slot, %err, "storage lookup failed, treating as miss");
            }
        }

        let block = match self.client.block_at_slot(slot).await? {
            Some(message) => Block::proposed(message.slot, message.proposer_index),
            None => {
                info!(target: "block_resolver", slot, "slot missed");
                metrics::counter!(Metrics::MISSED_SLOTS_TOTAL).increment(1);
                Block::missed(slot)
            }
        };

        if let Err(err) = self.store.insert_block(&block) {
            error!(target: "block_resolver", slot, %err, "failed to persist block");
        }
        Ok(block)
    }
}
