use crate::{BlockResolver, Cursors, Metrics, ReconcileError, ValidatorResolver};
use scribe_client::BeaconApi;
use scribe_storage::{BlockStore, ValidatorStore};
use scribe_types::{FINALITY_WINDOW_SECS, SECONDS_PER_SLOT};
use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tracing::{debug, error, info, warn};

/// Fixed delays applied between reconciliation steps.
///
/// Both are flat backoffs, not exponential; the defaults match the
/// original deployment (no delay at all).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Sleep after a successful step.
    pub loop_delay: Duration,
    /// Sleep after a failed step, before retrying the same cursor state.
    pub error_delay: Duration,
}

/// What a single reconciliation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The validator at this index became known; the validator cursor
    /// advanced.
    ValidatorDiscovered {
        /// The discovered validator index.
        index: u64,
    },
    /// The block at this slot was ingested; the slot cursor advanced.
    SlotIngested {
        /// The ingested slot.
        slot: u64,
    },
}

/// Whether the stored tip trails far enough behind `now` to keep
/// ingesting.
///
/// `latest_timestamp` is the highest stored block timestamp. An empty
/// store always ingests; otherwise ingestion continues while the tip is
/// more than a slot older than the finality threshold.
pub fn should_ingest(now: i64, latest_timestamp: Option<i64>) -> bool {
    let threshold = now - FINALITY_WINDOW_SECS;
    latest_timestamp.map_or(true, |latest| latest < threshold - SECONDS_PER_SLOT as i64)
}

/// The top-level driver: walks the validator and slot cursors forward in
/// lock-step against the resolvers, gated by the finality window.
///
/// Validator discovery is attempted once per iteration at the current
/// slot; only when the probed index is not yet known does the iteration
/// ingest the slot instead. Indices are chain-assigned in increasing
/// order, so each newly activated validator is discovered exactly once.
#[derive(Debug)]
pub struct Reconciler<DB, C> {
    db: Arc<DB>,
    validators: ValidatorResolver<DB, C>,
    blocks: BlockResolver<DB, C>,
    cursors: Cursors,
    config: ReconcilerConfig,
}

impl<DB, C> Reconciler<DB, C>
where
    DB: ValidatorStore + BlockStore,
    C: BeaconApi,
{
    /// Seeds the cursors from storage and builds the loop state.
    pub fn new(
        db: Arc<DB>,
        client: Arc<C>,
        config: ReconcilerConfig,
    ) -> Result<Self, ReconcileError> {
        let cursors = Cursors::seed(db.as_ref())?;
        Ok(Self {
            validators: ValidatorResolver::new(db.clone(), client.clone()),
            blocks: BlockResolver::new(db.clone(), client),
            db,
            cursors,
            config,
        })
    }

    /// The current cursor state.
    pub const fn cursors(&self) -> Cursors {
        self.cursors
    }

    /// Runs the loop until a fatal error. Recoverable failures are logged
    /// and retried with unchanged cursors after the error delay; there is
    /// no other termination condition.
    pub async fn run(mut self) -> Result<(), ReconcileError> {
        info!(
            target: "reconciler",
            next_validator_index = self.cursors.next_validator_index,
            next_slot = self.cursors.next_slot,
            "starting reconciliation"
        );

        loop {
            if !self.ingest_due() {
                debug!(target: "reconciler", "caught up to the finality window, waiting for a slot to pass");
                tokio::time::sleep(Duration::from_secs(SECONDS_PER_SLOT)).await;
                continue;
            }

            match self.step().await {
                Ok(outcome) => {
                    debug!(target: "reconciler", ?outcome, "step complete");
                    tokio::time::sleep(self.config.loop_delay).await;
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    error!(target: "reconciler", %err, "reconciliation step failed");
                    metrics::counter!(Metrics::STEP_FAILURES_TOTAL).increment(1);
                    tokio::time::sleep(self.config.error_delay).await;
                }
            }
        }
    }

    /// Performs one reconciliation step: probe the validator cursor at the
    /// current slot, and only if that index is not yet known, ingest the
    /// current slot and advance it.
    ///
    /// Cursors advance only on success, so a failed step is retried with
    /// identical state.
    pub async fn step(&mut self) -> Result<StepOutcome, ReconcileError> {
        let Cursors { next_validator_index, next_slot } = self.cursors;
        info!(target: "reconciler", validator = next_validator_index, slot = next_slot, "reconciling");

        if self.validators.resolve(next_validator_index, next_slot).await?.is_some() {
            self.cursors.next_validator_index += 1;
            metrics::counter!(Metrics::VALIDATORS_DISCOVERED_TOTAL).increment(1);
            return Ok(StepOutcome::ValidatorDiscovered { index: next_validator_index });
        }

        let block = self.blocks.resolve(next_slot).await?;
        self.cursors.next_slot += 1;
        metrics::counter!(Metrics::BLOCKS_INGESTED_TOTAL).increment(1);
        Ok(StepOutcome::SlotIngested { slot: block.slot })
    }

    fn ingest_due(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs() as i64);
        let latest = match self.db.max_timestamp() {
            Ok(latest) => latest,
            Err(err) => {
                warn!(target: "reconciler", %err, "failed to read the stored tip, ingesting anyway");
                None
            }
        };
        should_ingest(now, latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MemoryStore, MockApi};
    use rstest::rstest;
    use scribe_types::Block;

    const NOW: i64 = 1_700_000_000;

    #[rstest]
    // An empty store has no tip to be caught up to.
    #[case(None, true)]
    // Tip older than the trailing threshold: keep ingesting.
    #[case(Some(NOW - FINALITY_WINDOW_SECS - 100), true)]
    // Tip well inside the window: wait.
    #[case(Some(NOW - 1), false)]
    // Exactly at threshold minus one slot: not strictly older, wait.
    #[case(Some(NOW - FINALITY_WINDOW_SECS - 12), false)]
    #[case(Some(NOW - FINALITY_WINDOW_SECS - 13), true)]
    fn gate_tracks_the_finality_window(#[case] latest: Option<i64>, #[case] expected: bool) {
        assert_eq!(should_ingest(NOW, latest), expected);
    }

    #[tokio::test]
    async fn discovering_a_validator_leaves_the_slot_cursor_alone() {
        let db = Arc::new(MemoryStore::default());
        let client = Arc::new(MockApi::default().with_validator_known_from(0, 0));
        let mut reconciler = Reconciler::new(db, client, ReconcilerConfig::default()).unwrap();

        let outcome = reconciler.step().await.unwrap();
        assert_eq!(outcome, StepOutcome::ValidatorDiscovered { index: 0 });
        assert_eq!(reconciler.cursors(), Cursors { next_validator_index: 1, next_slot: 0 });
    }

    #[tokio::test]
    async fn an_unknown_validator_ingests_the_slot_instead() {
        let db = Arc::new(MemoryStore::default());
        let client = Arc::new(MockApi::default().with_block(0, 42));
        let mut reconciler =
            Reconciler::new(db.clone(), client, ReconcilerConfig::default()).unwrap();

        let outcome = reconciler.step().await.unwrap();
        assert_eq!(outcome, StepOutcome::SlotIngested { slot: 0 });
        assert_eq!(reconciler.cursors(), Cursors { next_validator_index: 0, next_slot: 1 });
        assert!(db.block_by_slot(0).unwrap().is_some());
    }

    #[tokio::test]
    async fn a_failed_step_does_not_advance_the_cursors() {
        let db = Arc::new(MemoryStore::default());
        let client = Arc::new(MockApi::default().with_upstream_failure());
        let mut reconciler = Reconciler::new(db, client, ReconcilerConfig::default()).unwrap();

        assert!(reconciler.step().await.is_err());
        assert_eq!(reconciler.cursors(), Cursors { next_validator_index: 0, next_slot: 0 });
    }

    #[tokio::test]
    async fn walks_validators_then_slots() {
        let db = Arc::new(MemoryStore::default());
        // Validators 0 and 1 known from genesis; slots 0 and 1 proposed.
        let client = Arc::new(
            MockApi::default()
                .with_validator_known_from(0, 0)
                .with_validator_known_from(1, 0)
                .with_block(0, 0)
                .with_block(1, 1),
        );
        let mut reconciler =
            Reconciler::new(db.clone(), client, ReconcilerConfig::default()).unwrap();

        let mut outcomes = Vec::new();
        for _ in 0..4 {
            outcomes.push(reconciler.step().await.unwrap());
        }
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::ValidatorDiscovered { index: 0 },
                StepOutcome::ValidatorDiscovered { index: 1 },
                StepOutcome::SlotIngested { slot: 0 },
                StepOutcome::SlotIngested { slot: 1 },
            ]
        );

        // Seeding a fresh loop over the same store resumes past the work.
        let resumed = Cursors::seed(db.as_ref()).unwrap();
        assert_eq!(resumed, Cursors { next_validator_index: 2, next_slot: 2 });
    }

    #[tokio::test]
    async fn a_malformed_success_body_halts_the_loop() {
        let db = Arc::new(MemoryStore::default());
        let client = Arc::new(MockApi::default().with_malformed_body());
        let reconciler = Reconciler::new(db, client, ReconcilerConfig::default()).unwrap();

        let err = reconciler.run().await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn missed_slots_are_ingested_like_proposed_ones() {
        let db = Arc::new(MemoryStore::default());
        let client = Arc::new(MockApi::default());
        let mut reconciler =
            Reconciler::new(db.clone(), client, ReconcilerConfig::default()).unwrap();

        reconciler.step().await.unwrap();
        assert_eq!(db.block_by_slot(0).unwrap(), Some(Block::missed(0)));
    }
}
