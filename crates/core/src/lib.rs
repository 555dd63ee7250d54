//! The reconciliation engine: resolvers that keep storage in sync with the
//! upstream beacon node, and the loop that drives them.
//!
//! The engine is single-writer and strictly sequential. Each iteration
//! either discovers the next validator index or ingests the next slot,
//! gated by a finality trailing window so only immutable chain data is
//! written.

mod error;
pub use error::ReconcileError;

mod metrics;
pub use metrics::Metrics;

mod resolver;
pub use resolver::{BlockResolver, ValidatorResolver};

mod reconciler;
pub use reconciler::{Cursors, Reconciler, ReconcilerConfig, StepOutcome, should_ingest};

#[cfg(test)]
pub(crate) mod test_utils;
