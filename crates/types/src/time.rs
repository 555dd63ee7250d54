//! Chain timing constants and the deterministic slot clock.

/// Seconds between consecutive slots.
pub const SECONDS_PER_SLOT: u64 = 12;

/// Slots per epoch.
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Unix timestamp of the genesis slot (mainnet).
pub const GENESIS_TIMESTAMP: i64 = 1_606_824_023;

/// Number of trailing epochs treated as not yet final.
pub const FINALIZED_EPOCH_COUNT: u64 = 2;

/// The trailing window, in seconds, the indexer stays behind the chain tip.
///
/// Slots older than this are assumed immutable, so everything ingested is
/// final by construction.
pub const FINALITY_WINDOW_SECS: i64 =
    (FINALIZED_EPOCH_COUNT * SLOTS_PER_EPOCH * SECONDS_PER_SLOT) as i64;

/// Unix timestamp at which `slot` begins.
///
/// The timestamp is derived, never read from an upstream payload, so a
/// missed slot carries the same timestamp a proposed block would have.
pub const fn timestamp_at_slot(slot: u64) -> i64 {
    GENESIS_TIMESTAMP + (SECONDS_PER_SLOT * slot) as i64
}
