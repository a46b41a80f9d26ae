//! In-memory transaction arena shared by the store implementations
//!
//! Records are kept in append order in a vector, with an id -> slot index for
//! O(1) lookup. The arena sits behind a single `RwLock`; writers hold the
//! exclusive lock across both the mutation and the persist step.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::error::{AccounterError, AccounterResult};
use crate::models::{NewTransaction, Transaction, TransactionId};

/// Append-ordered records plus an id index
#[derive(Debug, Clone)]
pub struct TransactionArena {
    records: Vec<Transaction>,
    slots: HashMap<TransactionId, usize>,
    next_id: i64,
}

impl TransactionArena {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            slots: HashMap::new(),
            next_id: 1,
        }
    }

    /// Build an arena from loaded records, keeping their order
    ///
    /// Fails if two records share an id.
    pub fn from_records(records: Vec<Transaction>) -> Result<Self, TransactionId> {
        let mut slots = HashMap::with_capacity(records.len());
        let mut max_id = 0;

        for (slot, txn) in records.iter().enumerate() {
            if slots.insert(txn.id, slot).is_some() {
                return Err(txn.id);
            }
            max_id = max_id.max(txn.id.value());
        }

        Ok(Self {
            records,
            slots,
            next_id: max_id + 1,
        })
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next insert will receive
    pub fn next_id(&self) -> TransactionId {
        TransactionId::new(self.next_id)
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.slots.get(&id).map(|&slot| &self.records[slot])
    }

    /// Append a new record with the next id
    pub fn insert(&mut self, input: NewTransaction, created_at: DateTime<Utc>) -> Transaction {
        let id = self.next_id();
        self.next_id += 1;

        let txn = Transaction::from_new(id, input, created_at);
        self.slots.insert(id, self.records.len());
        self.records.push(txn.clone());
        txn
    }

    /// Replace the caller-owned fields of an existing record
    pub fn replace(&mut self, txn: &Transaction) -> Option<Transaction> {
        let slot = *self.slots.get(&txn.id)?;
        let stored = &mut self.records[slot];
        stored.apply(txn);
        Some(stored.clone())
    }

    /// Remove a record, keeping the order of the rest
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let slot = self.slots.remove(&id)?;
        let removed = self.records.remove(slot);

        for (offset, txn) in self.records[slot..].iter().enumerate() {
            self.slots.insert(txn.id, slot + offset);
        }

        Some(removed)
    }
}

impl Default for TransactionArena {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`TransactionArena`] behind a read/write lock
#[derive(Debug, Default)]
pub struct SharedArena {
    inner: RwLock<TransactionArena>,
}

impl SharedArena {
    pub fn new(arena: TransactionArena) -> Self {
        Self {
            inner: RwLock::new(arena),
        }
    }

    pub fn read(&self) -> AccounterResult<RwLockReadGuard<'_, TransactionArena>> {
        self.inner.read().map_err(|e| {
            AccounterError::Storage(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> AccounterResult<RwLockWriteGuard<'_, TransactionArena>> {
        self.inner.write().map_err(|e| {
            AccounterError::Storage(format!("Failed to acquire write lock: {}", e))
        })
    }

    /// Apply `op` under the write lock, then `persist` the resulting records
    ///
    /// If `op` fails nothing changes. If `persist` fails the arena is restored
    /// to its state before `op` and the persistence error is returned.
    pub fn mutate<R>(
        &self,
        op: impl FnOnce(&mut TransactionArena) -> AccounterResult<R>,
        persist: impl FnOnce(&[Transaction]) -> AccounterResult<()>,
    ) -> AccounterResult<R> {
        let mut arena = self.write()?;
        let snapshot = arena.clone();

        let result = op(&mut arena)?;

        if let Err(e) = persist(arena.records()) {
            *arena = snapshot;
            return Err(e);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionType, UserId};
    use chrono::NaiveDate;

    fn input(cents: i64) -> NewTransaction {
        NewTransaction::new(
            UserId::new(1),
            TransactionType::Expense,
            Category::Food,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut arena = TransactionArena::new();
        let a = arena.insert(input(1), Utc::now());
        let b = arena.insert(input(2), Utc::now());
        assert_eq!(a.id, TransactionId::new(1));
        assert_eq!(b.id, TransactionId::new(2));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut arena = TransactionArena::new();
        for cents in 1..=4 {
            arena.insert(input(cents), Utc::now());
        }

        let removed = arena.remove(TransactionId::new(2)).unwrap();
        assert_eq!(removed.amount, Money::from_cents(2));

        let ids: Vec<i64> = arena.records().iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(arena.get(TransactionId::new(4)).unwrap().amount, Money::from_cents(4));
        assert!(arena.get(TransactionId::new(2)).is_none());

        // ids are not reused after a delete
        assert_eq!(arena.insert(input(5), Utc::now()).id, TransactionId::new(5));
    }

    #[test]
    fn test_from_records_continues_after_max_id() {
        let mut arena = TransactionArena::new();
        arena.insert(input(1), Utc::now());
        arena.insert(input(2), Utc::now());
        arena.remove(TransactionId::new(1));

        let reloaded = TransactionArena::from_records(arena.records().to_vec()).unwrap();
        assert_eq!(reloaded.next_id(), TransactionId::new(3));
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let mut arena = TransactionArena::new();
        let txn = arena.insert(input(1), Utc::now());
        let result = TransactionArena::from_records(vec![txn.clone(), txn]);
        assert_eq!(result.unwrap_err(), TransactionId::new(1));
    }

    #[test]
    fn test_mutate_rolls_back_on_persist_failure() {
        let shared = SharedArena::new(TransactionArena::new());

        let err = shared
            .mutate(
                |arena| Ok(arena.insert(input(1), Utc::now())),
                |_| Err(AccounterError::Persistence("disk full".into())),
            )
            .unwrap_err();
        assert!(err.is_persistence());

        let arena = shared.read().unwrap();
        assert!(arena.is_empty());
        assert_eq!(arena.next_id(), TransactionId::new(1));
    }
}
