//! The per-slot block record.

use crate::time::timestamp_at_slot;
use serde::{Deserialize, Serialize};

/// A slot's canonical content, or its absence.
///
/// Rows are insert-only and keyed by slot. A missed slot is stored exactly
/// like a proposed one, with `proposer_index` set to `0`; the two are not
/// distinguishable after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Canonical chain slot number.
    pub slot: u64,
    /// Index of the proposing validator, or `0` for a missed slot.
    pub proposer_index: u64,
    /// Unix timestamp derived from the slot number.
    pub timestamp: i64,
}

impl Block {
    /// Builds the record for a proposed block at `slot`.
    pub const fn proposed(slot: u64, proposer_index: u64) -> Self {
        Self { slot, proposer_index, timestamp: timestamp_at_slot(slot) }
    }

    /// Builds the synthetic record for a slot no block was proposed at.
    pub const fn missed(slot: u64) -> Self {
        Self { slot, proposer_index: 0, timestamp: timestamp_at_slot(slot) }
    }
}
