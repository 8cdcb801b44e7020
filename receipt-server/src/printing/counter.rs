//! redb-based receipt counter store
//!
//! A single named counter (`last_receipt_number`) persisted in a small
//! key-value table. The table is keyed by counter name, so the schema allows
//! multiple independent counters even though only one is used.
//!
//! # Semantics
//!
//! - `peek_next` computes `(last % max) + 1` without mutating anything; it
//!   does NOT reserve the number. The print orchestrator serializes the
//!   whole peek → emit → commit sequence, so no duplicate numbers are issued
//!   within one process.
//! - `commit` durably upserts the last used number and reports failure as
//!   `false` instead of an error, so a storage fault cannot crash a print
//!   that already physically succeeded.
//!
//! # Durability
//!
//! redb commits with immediate durability by default: once `commit()`
//! returns, the value survives power loss and the file stays consistent.

use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Counters table: key = counter name, value = last committed number
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

/// Name of the single counter used for receipt numbering
const RECEIPT_COUNTER: &str = "last_receipt_number";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Receipt counter backed by redb
#[derive(Clone)]
pub struct ReceiptCounter {
    db: Arc<Database>,
    #[cfg(test)]
    fail_commits: Arc<std::sync::atomic::AtomicBool>,
}

impl ReceiptCounter {
    /// Open or create the counter database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Create the table so first peek never hits a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            #[cfg(test)]
            fail_commits: Arc::default(),
        })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            fail_commits: Arc::default(),
        })
    }

    /// Force every subsequent commit to fail (for testing the fault path)
    #[cfg(test)]
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits
            .store(fail, std::sync::atomic::Ordering::Relaxed);
    }

    /// Return the number that would be assigned next, without mutating state
    ///
    /// Computed as `(last % max_val) + 1` with an implicit `last = 0` before
    /// the first commit, so the sequence cycles 1..=max_val and never yields
    /// 0 or max_val + 1. A `max_val` of 0 is clamped to 1.
    pub fn peek_next(&self, max_val: u64) -> StorageResult<u64> {
        let max_val = max_val.max(1);
        Ok((self.last()? % max_val) + 1)
    }

    /// Durably record `number` as the last used receipt number
    ///
    /// Idempotent upsert by counter name. Returns `false` (prior state
    /// intact) on any storage failure; never panics or propagates, so a
    /// failed commit cannot crash the orchestrator.
    pub fn commit(&self, number: u64) -> bool {
        #[cfg(test)]
        if self.fail_commits.load(std::sync::atomic::Ordering::Relaxed) {
            tracing::error!(number, "Failed to commit receipt number");
            return false;
        }

        match self.try_commit(number) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(number, error = %e, "Failed to commit receipt number");
                false
            }
        }
    }

    fn try_commit(&self, number: u64) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COUNTERS_TABLE)?;
            table.insert(RECEIPT_COUNTER, number)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn last(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COUNTERS_TABLE)?;
        Ok(table
            .get(RECEIPT_COUNTER)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }
}
