//! Transaction filter

use chrono::NaiveDate;

use crate::error::AccounterResult;
use crate::models::{Category, Transaction, TransactionType, UserId};
use crate::storage::TransactionStore;

use super::page::Page;

/// Options for filtering transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    pub user_id: UserId,
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
    /// 1-based; 0 is read as 1
    pub page: usize,
    /// 0 means the caller's default page size
    pub page_size: usize,
}

impl TransactionFilter {
    /// Filter matching every transaction of one user
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            kind: None,
            category: None,
            start_date: None,
            end_date: None,
            page: 1,
            page_size: 0,
        }
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by date range (inclusive on both ends)
    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Check a single record against every set predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        if txn.user_id != self.user_id {
            return false;
        }
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        if self.category.is_some_and(|category| txn.category != category) {
            return false;
        }
        if self.start_date.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| txn.date > end) {
            return false;
        }
        true
    }

    /// Every matching record in storage order, ignoring pagination
    pub fn matching(&self, store: &dyn TransactionStore) -> AccounterResult<Vec<Transaction>> {
        let mut out = Vec::new();
        store.scan(&mut |txn| {
            if self.matches(txn) {
                out.push(txn.clone());
            }
        })?;
        Ok(out)
    }

    /// The requested page of matches plus the total match count
    pub fn run(
        &self,
        store: &dyn TransactionStore,
        default_page_size: usize,
    ) -> AccounterResult<Page<Transaction>> {
        let page = self.page.max(1);
        let page_size = match self.page_size {
            0 => default_page_size.max(1),
            n => n,
        };

        let all = self.matching(store)?;
        Ok(Page::slice(all, page, page_size))
    }
}
