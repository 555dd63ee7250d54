//! The validator record.

use serde::{Deserialize, Serialize};

/// A chain validator as observed at a specific slot.
///
/// Persistence is insert-only with first-write-wins semantics per index:
/// once a row exists for an index it is reused verbatim, even if the
/// validator's epoch fields have since changed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Chain-assigned sequential identifier, stable across slots.
    pub index: u64,
    /// Hex-encoded BLS public key (`0x` prefix plus 96 hex characters).
    pub public_key: String,
    /// Epoch at which the validator became active. The upstream far-future
    /// sentinel is normalized to `0` at the decode boundary.
    pub activation_epoch: u64,
    /// Epoch at which the validator exited, or `None` while still active.
    pub exit_epoch: Option<u64>,
    /// Slot at which this state was queried; stored as provenance.
    pub at_slot: u64,
}
