//! The Postgres-backed store owning the process's single connection.

use crate::{
    BlockStore, StorageError, ValidatorStore,
    models::{BlockRow, ValidatorRow},
    schema::{blocks, validators},
};
use diesel::{PgConnection, prelude::*};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use scribe_types::{Block, Validator};
use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::info;

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Handle to the Postgres store.
///
/// The indexer is single-writer and strictly sequential, so one connection
/// behind a mutex is the entire pool.
pub struct Database {
    conn: Mutex<PgConnection>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Connects to the database at `database_url`.
    pub fn connect(database_url: &str) -> Result<Self, StorageError> {
        let conn = PgConnection::establish(database_url)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Applies any pending embedded migrations.
    pub fn run_migrations(&self) -> Result<(), StorageError> {
        let mut conn = self.conn();
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| StorageError::Migration(err.to_string()))?;
        if !applied.is_empty() {
            info!(target: "storage", count = applied.len(), "applied pending migrations");
        }
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, PgConnection> {
        // A poisoned lock only means a previous caller panicked mid-query;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ValidatorStore for Database {
    fn validator_by_index(&self, index: u64) -> Result<Option<Validator>, StorageError> {
        let row = validators::table
            .find(index as i64)
            .select(ValidatorRow::as_select())
            .first(&mut *self.conn())
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn max_validator_index(&self) -> Result<Option<u64>, StorageError> {
        let max: Option<i64> = validators::table
            .select(diesel::dsl::max(validators::index))
            .first(&mut *self.conn())?;
        Ok(max.map(|value| value as u64))
    }

    fn insert_validator(&self, validator: &Validator) -> Result<(), StorageError> {
        diesel::insert_into(validators::table)
            .values(ValidatorRow::from(validator))
            .on_conflict_do_nothing()
            .execute(&mut *self.conn())?;
        Ok(())
    }
}

impl BlockStore for Database {
    fn block_by_slot(&self, slot: u64) -> Result<Option<Block>, StorageError> {
        let row = blocks::table
            .find(slot as i64)
            .select(BlockRow::as_select())
            .first(&mut *self.conn())
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn max_slot(&self) -> Result<Option<u64>, StorageError> {
        let max: Option<i64> =
            blocks::table.select(diesel::dsl::max(blocks::slot)).first(&mut *self.conn())?;
        Ok(max.map(|value| value as u64))
    }

    fn max_timestamp(&self) -> Result<Option<i64>, StorageError> {
        blocks::table
            .select(diesel::dsl::max(blocks::timestamp))
            .first(&mut *self.conn())
            .map_err(Into::into)
    }

    fn insert_block(&self, block: &Block) -> Result<(), StorageError> {
        diesel::insert_into(blocks::table)
            .values(BlockRow::from(block))
            .on_conflict_do_nothing()
            .execute(&mut *self.conn())?;
        Ok(())
    }
}
