//! The top-level reconciliation loop.

mod cursors;
pub use cursors::Cursors;

mod task;
pub use task::{Reconciler, ReconcilerConfig, StepOutcome, should_ingest};
