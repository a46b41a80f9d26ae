//! File-backed transaction store
//!
//! Keeps every transaction in memory and rewrites the JSON data file after
//! each mutation.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::{AccounterError, AccounterResult};
use crate::models::{NewTransaction, Transaction, TransactionId};

use super::arena::{SharedArena, TransactionArena};
use super::file_io::{read_json, write_json_atomic};
use super::TransactionStore;

/// Transaction store persisted as a JSON array
pub struct JsonTransactionStore {
    path: PathBuf,
    arena: SharedArena,
}

impl JsonTransactionStore {
    /// Open the store, loading the data file if present
    ///
    /// A missing file is an empty store. A file that cannot be read or parsed
    /// is an error.
    pub fn open(path: impl Into<PathBuf>) -> AccounterResult<Self> {
        let path = path.into();
        let records: Vec<Transaction> = read_json(&path).map_err(|e| {
            error!(path = %path.display(), error = %e, "failed to load transactions");
            e
        })?;

        let arena = TransactionArena::from_records(records).map_err(|id| {
            AccounterError::Persistence(format!(
                "Duplicate transaction id {} in {}",
                id,
                path.display()
            ))
        })?;

        debug!(
            path = %path.display(),
            count = arena.len(),
            next_id = %arena.next_id(),
            "loaded transactions"
        );

        Ok(Self {
            path,
            arena: SharedArena::new(arena),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &[Transaction]) -> AccounterResult<()> {
        write_json_atomic(&self.path, records).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to persist transactions");
            e
        })?;
        debug!(count = records.len(), "persisted transactions");
        Ok(())
    }
}

impl TransactionStore for JsonTransactionStore {
    fn save(&self, input: NewTransaction) -> AccounterResult<Transaction> {
        let txn = self.arena.mutate(
            |arena| Ok(arena.insert(input, Utc::now())),
            |records| self.persist(records),
        )?;
        info!(id = %txn.id, user = %txn.user_id, "saved transaction");
        Ok(txn)
    }

    fn update(&self, txn: Transaction) -> AccounterResult<Transaction> {
        let updated = self.arena.mutate(
            |arena| {
                arena
                    .replace(&txn)
                    .ok_or_else(|| AccounterError::transaction_not_found(txn.id.to_string()))
            },
            |records| self.persist(records),
        )?;
        info!(id = %updated.id, "updated transaction");
        Ok(updated)
    }

    fn find_by_id(&self, id: TransactionId) -> AccounterResult<Transaction> {
        self.arena
            .read()?
            .get(id)
            .cloned()
            .ok_or_else(|| AccounterError::transaction_not_found(id.to_string()))
    }

    fn delete(&self, id: TransactionId) -> AccounterResult<Transaction> {
        let removed = self.arena.mutate(
            |arena| {
                arena
                    .remove(id)
                    .ok_or_else(|| AccounterError::transaction_not_found(id.to_string()))
            },
            |records| self.persist(records),
        )?;
        info!(id = %id, "deleted transaction");
        Ok(removed)
    }

    fn scan(&self, visit: &mut dyn FnMut(&Transaction)) -> AccounterResult<()> {
        let arena = self.arena.read()?;
        arena.records().iter().for_each(visit);
        Ok(())
    }

    fn count(&self) -> AccounterResult<usize> {
        Ok(self.arena.read()?.len())
    }
}
