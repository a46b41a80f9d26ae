//! Transaction store without persistence
//!
//! Shares the arena and locking of the file-backed store. Used by tests and
//! anywhere a throwaway ledger is enough.

use chrono::Utc;
use tracing::debug;

use crate::error::{AccounterError, AccounterResult};
use crate::models::{NewTransaction, Transaction, TransactionId};

use super::arena::{SharedArena, TransactionArena};
use super::TransactionStore;

#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    arena: SharedArena,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_records(records: Vec<Transaction>) -> AccounterResult<Self> {
        let arena = TransactionArena::from_records(records).map_err(|id| {
            AccounterError::Storage(format!("Duplicate transaction id {}", id))
        })?;
        Ok(Self {
            arena: SharedArena::new(arena),
        })
    }
}

fn no_persist(_: &[Transaction]) -> AccounterResult<()> {
    Ok(())
}

impl TransactionStore for MemoryTransactionStore {
    fn save(&self, input: NewTransaction) -> AccounterResult<Transaction> {
        let txn = self
            .arena
            .mutate(|arena| Ok(arena.insert(input, Utc::now())), no_persist)?;
        debug!(id = %txn.id, "saved transaction in memory");
        Ok(txn)
    }

    fn update(&self, txn: Transaction) -> AccounterResult<Transaction> {
        self.arena.mutate(
            |arena| {
                arena
                    .replace(&txn)
                    .ok_or_else(|| AccounterError::transaction_not_found(txn.id.to_string()))
            },
            no_persist,
        )
    }

    fn find_by_id(&self, id: TransactionId) -> AccounterResult<Transaction> {
        self.arena
            .read()?
            .get(id)
            .cloned()
            .ok_or_else(|| AccounterError::transaction_not_found(id.to_string()))
    }

    fn delete(&self, id: TransactionId) -> AccounterResult<Transaction> {
        self.arena.mutate(
            |arena| {
                arena
                    .remove(id)
                    .ok_or_else(|| AccounterError::transaction_not_found(id.to_string()))
            },
            no_persist,
        )
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
