//! Wire documents returned by the beacon-node API.
//!
//! The beacon API encodes every integer as a decimal string; the
//! [`u64_string`] helper handles that once for all fields.

use scribe_types::Validator;
use serde::Deserialize;

/// The far-future epoch sentinel the beacon chain uses for "never".
const FAR_FUTURE_EPOCH: u64 = u64::MAX;

/// Deserializes a decimal-string-encoded `u64`.
mod u64_string {
    use serde::{Deserialize, Deserializer, de};

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Envelope of `/eth/v2/beacon/blocks/{slot}`.
#[derive(Debug, Deserialize)]
pub(crate) struct BlockEnvelope {
    data: BlockData,
}

#[derive(Debug, Deserialize)]
struct BlockData {
    message: BlockMessage,
}

/// The block fields the indexer consumes.
///
/// The payload also carries a body and an execution timestamp; both are
/// ignored, the indexer derives timestamps from the slot number alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BlockMessage {
    /// Slot the block was proposed at.
    #[serde(with = "u64_string")]
    pub slot: u64,
    /// Index of the proposing validator.
    #[serde(with = "u64_string")]
    pub proposer_index: u64,
}

impl BlockEnvelope {
    pub(crate) fn into_message(self) -> BlockMessage {
        self.data.message
    }
}

/// Envelope of `/eth/v1/beacon/states/{slot}/validators/{index}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ValidatorEnvelope {
    data: ValidatorData,
}

#[derive(Debug, Deserialize)]
struct ValidatorData {
    #[serde(with = "u64_string")]
    index: u64,
    validator: ValidatorInfo,
}

#[derive(Debug, Deserialize)]
struct ValidatorInfo {
    pubkey: String,
    #[serde(with = "u64_string")]
    activation_epoch: u64,
    #[serde(with = "u64_string")]
    exit_epoch: u64,
}

impl ValidatorEnvelope {
    /// Collapses the envelope into the domain record, stamping `at_slot`
    /// with the slot the state was queried at.
    ///
    /// The two far-future sentinels are normalized differently on purpose:
    /// an unset activation epoch becomes `0`, an unset exit epoch becomes
    /// `None`. This mirrors the stored shape downstream consumers already
    /// depend on.
    pub(crate) fn into_validator(self, at_slot: u64) -> Validator {
        let ValidatorData { index, validator } = self.data;
        Validator {
            index,
            public_key: validator.pubkey,
            activation_epoch: if validator.activation_epoch == FAR_FUTURE_EPOCH {
                0
            } else {
                validator.activation_epoch
            },
            exit_epoch: (validator.exit_epoch != FAR_FUTURE_EPOCH).then_some(validator.exit_epoch),
            at_slot,
        }
    }
}
