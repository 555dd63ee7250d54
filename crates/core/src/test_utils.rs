//! Hand-rolled mocks shared by the engine tests.

use async_trait::async_trait;
use scribe_client::{BeaconApi, BlockMessage, ClientError};
use scribe_storage::{BlockStore, StorageError, ValidatorStore};
use scribe_types::{Block, Validator};
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// A validator with a plausible 98-character public key.
pub(crate) fn validator_fixture(index: u64, at_slot: u64) -> Validator {
    Validator {
        index,
        public_key: format!("0x{index:096x}"),
        activation_epoch: 0,
        exit_epoch: None,
        at_slot,
    }
}

/// Scripted upstream: blocks by slot, validators by first-known slot.
#[derive(Debug, Default)]
pub(crate) struct MockApi {
    blocks: BTreeMap<u64, u64>,
    known_from: BTreeMap<u64, u64>,
    fail: bool,
    fail_decode: bool,
    block_calls: AtomicUsize,
    validator_calls: AtomicUsize,
}

impl MockApi {
    /// Scripts a proposed block at `slot`.
    pub(crate) fn with_block(mut self, slot: u64, proposer_index: u64) -> Self {
        self.blocks.insert(slot, proposer_index);
        self
    }

    /// Scripts validator `index` as known at every slot at or after `slot`.
    pub(crate) fn with_validator_known_from(mut self, index: u64, slot: u64) -> Self {
        self.known_from.insert(index, slot);
        self
    }

    /// Makes every call fail with an upstream error.
    pub(crate) fn with_upstream_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Makes every call fail as if the 2xx body did not decode.
    pub(crate) fn with_malformed_body(mut self) -> Self {
        self.fail_decode = true;
        self
    }

    pub(crate) fn block_calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn validator_calls(&self) -> usize {
        self.validator_calls.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Option<ClientError> {
        if self.fail_decode {
            let err = serde_json::from_str::<u64>("not json").unwrap_err();
            return Some(ClientError::Decode(err));
        }
        self.fail.then(|| ClientError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            path: "/mock".to_string(),
        })
    }
}

#[async_trait]
impl BeaconApi for MockApi {
    async fn block_at_slot(&self, slot: u64) -> Result<Option<BlockMessage>, ClientError> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.blocks.get(&slot).map(|&proposer_index| BlockMessage { slot, proposer_index }))
    }

    async fn validator_at_slot(
        &self,
        slot: u64,
        index: u64,
    ) -> Result<Option<Validator>, ClientError> {
        self.validator_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let known = self.known_from.get(&index).is_some_and(|&first| slot >= first);
        Ok(known.then(|| validator_fixture(index, slot)))
    }
}

/// In-memory store with the same insert-only semantics as Postgres.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    validators: Mutex<BTreeMap<u64, Validator>>,
    blocks: Mutex<BTreeMap<u64, Block>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    /// Makes every lookup fail.
    pub(crate) fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Makes every insert fail.
    pub(crate) fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    fn read_guard(&self) -> Result<(), StorageError> {
        if self.fail_reads {
            return Err(StorageError::Migration("injected read failure".to_string()));
        }
        Ok(())
    }

    fn write_guard(&self) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Migration("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl ValidatorStore for MemoryStore {
    fn validator_by_index(&self, index: u64) -> Result<Option<Validator>, StorageError> {
        self.read_guard()?;
        Ok(self.validators.lock().unwrap().get(&index).cloned())
    }

    fn max_validator_index(&self) -> Result<Option<u64>, StorageError> {
        self.read_guard()?;
        Ok(self.validators.lock().unwrap().keys().next_back().copied())
    }

    fn insert_validator(&self, validator: &Validator) -> Result<(), StorageError> {
        self.write_guard()?;
        self.validators
            .lock()
            .unwrap()
            .entry(validator.index)
            .or_insert_with(|| validator.clone());
        Ok(())
    }
}

impl BlockStore for MemoryStore {
    fn block_by_slot(&self, slot: u64) -> Result<Option<Block>, StorageError> {
        self.read_guard()?;
        Ok(self.blocks.lock().unwrap().get(&slot).copied())
    }

    fn max_slot(&self) -> Result<Option<u64>, StorageError> {
        self.read_guard()?;
        Ok(self.blocks.lock().unwrap().keys().next_back().copied())
    }

    fn max_timestamp(&self) -> Result<Option<i64>, StorageError> {
        self.read_guard()?;
        Ok(self.blocks.lock().unwrap().values().map(|block| block.timestamp).max())
    }

    fn insert_block(&self, block: &Block) -> Result<(), StorageError> {
        self.write_guard()?;
        self.blocks.lock().unwrap().entry(block.slot).or_insert(*block);
        Ok(())
    }
}
