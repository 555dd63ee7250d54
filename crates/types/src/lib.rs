//! Domain types for the scribe consensus-layer indexer.
//!
//! This crate holds the entities the indexer persists ([`Validator`],
//! [`Block`]) and the chain timing constants everything else derives
//! timestamps and finality bounds from.

mod block;
pub use block::Block;

mod validator;
pub use validator::Validator;

pub mod time;
pub use time::{
    FINALITY_WINDOW_SECS, GENESIS_TIMESTAMP, SECONDS_PER_SLOT, SLOTS_PER_EPOCH, timestamp_at_slot,
};
