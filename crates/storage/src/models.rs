//! Row types bridging the diesel schema and the domain entities.

use crate::schema::{blocks, validators};
use diesel::prelude::*;
use scribe_types::{Block, Validator};

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlockRow {
    pub(crate) slot: i64,
    pub(crate) proposer_index: i64,
    pub(crate) timestamp: i64,
}

impl From<&Block> for BlockRow {
    fn from(block: &Block) -> Self {
        Self {
            slot: block.slot as i64,
            proposer_index: block.proposer_index as i64,
            timestamp: block.timestamp,
        }
    }
}

impl From<BlockRow> for Block {
    fn from(row: BlockRow) -> Self {
        Self {
            slot: row.slot as u64,
            proposer_index: row.proposer_index as u64,
            timestamp: row.timestamp,
        }
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = validators)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ValidatorRow {
    pub(crate) index: i64,
    pub(crate) public_key: String,
    pub(crate) activation_epoch: i64,
    pub(crate) exit_epoch: Option<i64>,
    pub(crate) at_slot: i64,
}

impl From<&Validator> for ValidatorRow {
    fn from(validator: &Validator) -> Self {
        Self {
            index: validator.index as i64,
            public_key: validator.public_key.clone(),
            activation_epoch: validator.activation_epoch as i64,
            exit_epoch: validator.exit_epoch.map(|epoch| epoch as i64),
            at_slot: validator.at_slot as i64,
        }
    }
}

impl From<ValidatorRow> for Validator {
    fn from(row: ValidatorRow) -> Self {
        Self {
            index: row.index as u64,
            // CHAR(98) comes back space-padded if anything shorter was ever
            // stored; trim so round-trips compare equal.
            public_key: row.public_key.trim_end().to_string(),
            activation_epoch: row.activation_epoch as u64,
            exit_epoch: row.exit_epoch.map(|epoch| epoch as u64),
            at_slot: row.at_slot as u64,
        }
    }
}
