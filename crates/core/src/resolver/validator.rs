use scribe_client::{BeaconApi, ClientError};
use scribe_storage::ValidatorStore;
use scribe_types::Validator;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Resolves validators storage-first, falling back to the upstream client
/// and persisting what the fallback returns.
#[derive(Debug)]
pub struct ValidatorResolver<S, C> {
    store: Arc<S>,
    client: Arc<C>,
}

impl<S, C> ValidatorResolver<S, C>
where
    S: ValidatorStore,
    C: BeaconApi,
{
    /// Creates a new [`ValidatorResolver`].
    pub const fn new(store: Arc<S>, client: Arc<C>) -> Self {
        Self { store, client }
    }

    /// Returns the validator at `index` as known at `at_slot`, or `None`
    /// if the index is not yet known to the chain at that slot.
    ///
    /// Storage wins over the network: a stored row is returned verbatim
    /// even when its provenance slot differs from `at_slot`. A storage
    /// read failure is degraded to a cache miss; a storage write failure
    /// is logged and the fetched value still returned. Unknown validators
    /// are never cached.
    pub async fn resolve(
        &self,
        index: u64,
        at_slot: u64,
    ) -> Result<Option<Validator>, ClientError> {
        match self.store.validator_by_index(index) {
            Ok(Some(validator)) => return Ok(Some(validator)),
            Ok(None) => {}
            Err(err) => {
                warn!(target: "validator_resolver", index, %err, "storage lookup failed, treating as miss");
            }
        }

        let Some(validator) = self.client.validator_at_slot(at_slot, index).await? else {
            debug!(target: "validator_resolver", index, at_slot, "validator not yet known");
            return Ok(None);
        };

        if let Err(err) = self.store.insert_validator(&validator) {
            error!(target: "validator_resolver", index, %err, "failed to persist validator");
        }
        Ok(Some(validator))
    }

    /// Locates the smallest slot at or after `from_slot` at which `index`
    /// is known to the chain.
    ///
    /// Runs an exponential probe to bracket the first appearance, then a
    /// binary search to the exact boundary. Probes always go upstream: the
    /// storage cache is keyed by index alone, so a warm cache would answer
    /// "known" for every probed slot and break the predicate.
    ///
    /// Correctness requires known-ness to be monotonic in the slot number
    /// (once a validator index is known it stays known), which holds for
    /// chain-assigned indices.
    pub async fn find_first_slot(&self, index: u64, from_slot: u64) -> Result<u64, ClientError> {
        let mut lower = from_slot;
        let mut upper = from_slot + 1;
        while !self.known_at(index, upper).await? {
            lower = upper;
            upper *= 2;
        }

        // Lower-bound search for the first known slot in [lower, upper].
        let mut lo = lower;
        let mut hi = upper;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.known_at(index, mid).await? {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        debug!(target: "validator_resolver", index, slot = lo, "first appearance located");
        Ok(lo)
    }

    async fn known_at(&self, index: u64, slot: u64) -> Result<bool, ClientError> {
        Ok(self.client.validator_at_slot(slot, index).await?.is_some())
    }
}
