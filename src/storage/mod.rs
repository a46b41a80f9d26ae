//! Storage layer for Accounter
//!
//! Transactions live in an in-memory arena guarded by a read/write lock. The
//! file-backed store rewrites a JSON document atomically after every
//! mutation; the memory store skips persistence entirely.

pub mod arena;
pub mod file_io;
pub mod memory;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use memory::MemoryTransactionStore;
pub use transactions::JsonTransactionStore;

use crate::config::paths::AccounterPaths;
use crate::config::settings::Settings;
use crate::error::AccounterResult;
use crate::models::{NewTransaction, Transaction, TransactionId, UserId};

/// Operations every transaction store provides
///
/// Implementations assign ids and creation timestamps themselves; callers
/// never pick them.
pub trait TransactionStore: Send + Sync {
    /// Assign the next id, stamp `created_at`, append and persist
    fn save(&self, input: NewTransaction) -> AccounterResult<Transaction>;

    /// Replace every field except `id` and `created_at`
    fn update(&self, txn: Transaction) -> AccounterResult<Transaction>;

    fn find_by_id(&self, id: TransactionId) -> AccounterResult<Transaction>;

    /// Remove a transaction, returning the removed record
    fn delete(&self, id: TransactionId) -> AccounterResult<Transaction>;

    /// Visit every record in storage order while holding the read lock
    fn scan(&self, visit: &mut dyn FnMut(&Transaction)) -> AccounterResult<()>;

    fn count(&self) -> AccounterResult<usize>;

    /// All records in storage order
    fn list_all(&self) -> AccounterResult<Vec<Transaction>> {
        let mut out = Vec::new();
        self.scan(&mut |txn| out.push(txn.clone()))?;
        Ok(out)
    }

    /// One user's records in storage order
    fn list_by_user(&self, user_id: UserId) -> AccounterResult<Vec<Transaction>> {
        let mut out = Vec::new();
        self.scan(&mut |txn| {
            if txn.user_id == user_id {
                out.push(txn.clone());
            }
        })?;
        Ok(out)
    }
}

/// Opens the on-disk store for a configured data directory
pub struct Storage {
    paths: AccounterPaths,
    pub transactions: JsonTransactionStore,
}

impl Storage {
    /// Create the data directories and load the transactions file
    pub fn open(paths: AccounterPaths, settings: &Settings) -> AccounterResult<Self> {
        paths.ensure_directories()?;
        let transactions = JsonTransactionStore::open(paths.transactions_file(settings))?;
        Ok(Self {
            paths,
            transactions,
        })
    }

    pub fn paths(&self) -> &AccounterPaths {
        &self.paths
    }

    /// Check if `accounter init` has been run
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AccounterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(
            storage.transactions.path(),
            temp_dir.path().join("data").join("accounters.json")
        );
    }
}
