//! Transaction service
//!
//! Turns loosely typed requests (date strings, optional user ids, page
//! numbers) into store operations, filters and reports.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{AccounterError, AccounterResult};
use crate::models::{
    Category, Granularity, Money, NewTransaction, Transaction, TransactionId, TransactionType,
    UserId,
};
use crate::query::{Page, TransactionFilter};
use crate::reports::{CategoryReport, PeriodFilter, PeriodReport, StatsFilter};
use crate::storage::TransactionStore;

/// Date format accepted in requests
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct AddTransactionRequest {
    pub user_id: Option<UserId>,
    pub kind: TransactionType,
    pub category: Category,
    pub description: Option<String>,
    pub amount: Money,
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
}

/// Input for listing transactions
#[derive(Debug, Clone, Default)]
pub struct ListTransactionsRequest {
    pub user_id: Option<UserId>,
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Fields to change on an existing transaction; `None` keeps the old value
#[derive(Debug, Clone, Default)]
pub struct EditTransactionRequest {
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<String>,
}

impl EditTransactionRequest {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.date.is_none()
    }
}

/// Input for category statistics
#[derive(Debug, Clone, Default)]
pub struct CategoryStatsRequest {
    pub user_id: Option<UserId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Input for period statistics
#[derive(Debug, Clone, Default)]
pub struct PeriodStatsRequest {
    pub user_id: Option<UserId>,
    pub granularity: Granularity,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub week: Option<u32>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a dyn TransactionStore,
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> TransactionService<'a> {
    pub fn new(store: &'a dyn TransactionStore, settings: &'a Settings) -> Self {
        Self {
            store,
            settings,
            today: Local::now().date_naive(),
        }
    }

    /// Use a fixed date for "today" instead of the system clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn user_or_default(&self, user_id: Option<UserId>) -> UserId {
        user_id.unwrap_or(self.settings.default_user_id)
    }

    /// Record a new transaction
    pub fn add(&self, request: AddTransactionRequest) -> AccounterResult<Transaction> {
        let date = match request.date.as_deref() {
            Some(s) => parse_date("date", s)?,
            None => self.today,
        };

        let mut input = NewTransaction::new(
            self.user_or_default(request.user_id),
            request.kind,
            request.category,
            request.amount,
            date,
        );
        if let Some(description) = request.description {
            input = input.with_description(description.trim());
        }

        input
            .validate()
            .map_err(|e| AccounterError::Validation(e.to_string()))?;

        let txn = self.store.save(input)?;
        info!(id = %txn.id, kind = txn.kind.slug(), category = txn.category.slug(), "recorded transaction");
        Ok(txn)
    }

    /// One page of a user's transactions matching the request
    pub fn list(&self, request: ListTransactionsRequest) -> AccounterResult<Page<Transaction>> {
        let filter = self.build_filter(&request)?;
        let page = filter.run(self.store, self.settings.default_page_size)?;
        debug!(total = page.total, page = page.page, "listed transactions");
        Ok(page)
    }

    /// Every transaction matching the request, ignoring pagination
    pub fn matching(&self, request: ListTransactionsRequest) -> AccounterResult<Vec<Transaction>> {
        self.build_filter(&request)?.matching(self.store)
    }

    fn build_filter(&self, request: &ListTransactionsRequest) -> AccounterResult<TransactionFilter> {
        let (start, end) = parse_range(request.start_date.as_deref(), request.end_date.as_deref())?;

        let mut filter = TransactionFilter::for_user(self.user_or_default(request.user_id))
            .date_range(start, end)
            .page(request.page.unwrap_or(1), request.page_size.unwrap_or(0));
        if let Some(kind) = request.kind {
            filter = filter.kind(kind);
        }
        if let Some(category) = request.category {
            filter = filter.category(category);
        }
        Ok(filter)
    }

    pub fn get(&self, id: TransactionId) -> AccounterResult<Transaction> {
        self.store.find_by_id(id)
    }

    /// Change some fields of a transaction
    pub fn edit(
        &self,
        id: TransactionId,
        request: EditTransactionRequest,
    ) -> AccounterResult<Transaction> {
        let mut txn = self.store.find_by_id(id)?;

        if let Some(kind) = request.kind {
            txn.kind = kind;
        }
        if let Some(category) = request.category {
            txn.category = category;
        }
        if let Some(description) = request.description {
            txn.description = description.trim().to_string();
        }
        if let Some(amount) = request.amount {
            txn.amount = amount;
        }
        if let Some(date) = request.date.as_deref() {
            txn.date = parse_date("date", date)?;
        }

        txn.validate()
            .map_err(|e| AccounterError::Validation(e.to_string()))?;

        self.store.update(txn)
    }

    pub fn delete(&self, id: TransactionId) -> AccounterResult<Transaction> {
        self.store.delete(id)
    }

    /// Income and expense per category
    pub fn category_stats(&self, request: CategoryStatsRequest) -> AccounterResult<CategoryReport> {
        let (start, end) = parse_range(request.start_date.as_deref(), request.end_date.as_deref())?;
        let filter = StatsFilter::for_user(self.user_or_default(request.user_id)).date_range(start, end);
        CategoryReport::generate(self.store, &filter)
    }

    /// Income and expense per week, month or year
    pub fn period_stats(&self, request: PeriodStatsRequest) -> AccounterResult<PeriodReport> {
        let mut filter =
            PeriodFilter::new(self.user_or_default(request.user_id), request.granularity);

        if let Some(year) = request.year {
            filter = filter.year(year);
        }
        if let Some(month) = request.month {
            if !(1..=12).contains(&month) {
                return Err(AccounterError::Validation(format!(
                    "month must be between 1 and 12, got {}",
                    month
                )));
            }
            filter = filter.month(month);
        }
        if let Some(week) = request.week {
            if !(1..=53).contains(&week) {
                return Err(AccounterError::Validation(format!(
                    "week must be between 1 and 53, got {}",
                    week
                )));
            }
            filter = filter.week(week);
        }

        PeriodReport::generate(self.store, &filter)
    }
}

/// Parse a `YYYY-MM-DD` request field
pub fn parse_date(field: &str, value: &str) -> AccounterResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AccounterError::Validation(format!(
            "Invalid {} '{}'. Use YYYY-MM-DD",
            field, value
        ))
    })
}

fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> AccounterResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = start.map(|s| parse_date("start date", s)).transpose()?;
    let end = end.map(|s| parse_date("end date", s)).transpose()?;

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(AccounterError::Validation(format!(
                "Start date {} is after end date {}",
                s, e
            )));
        }
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AccounterPaths;
    use crate::storage::{MemoryTransactionStore, Storage};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn expense(cents: i64, date: Option<&str>) -> AddTransactionRequest {
        AddTransactionRequest {
            user_id: None,
            kind: TransactionType::Expense,
            category: Category::Food,
            description: Some("  lunch ".to_string()),
            amount: Money::from_cents(cents),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_add_defaults() {
        let store = MemoryTransactionStore::new();
        let settings = Settings::default();
        let service = TransactionService::new(&store, &settings).with_today(today());

        let txn = service.add(expense(1200, None)).unwrap();
        assert_eq!(txn.date, today());
        assert_eq!(txn.user_id, UserId::new(1));
        assert_eq!(txn.description, "lunch");
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let store = MemoryTransactionStore::new();
        let settings = Settings::default();
        let service = TransactionService::new(&store, &settings);

        assert!(service.add(expense(100, Some("2024-13-01"))).unwrap_err().is_validation());
        assert!(service.add(expense(100, Some("yesterday"))).unwrap_err().is_validation());
        assert!(service.add(expense(-1, None)).unwrap_err().is_validation());
        assert!(service
            .add(expense(9_000_000_000_000_000, None))
            .unwrap_err()
            .is_validation());

        let mut long = expense(100, None);
        long.description = Some("饭".repeat(256));
        assert!(service.add(long).unwrap_err().is_validation());

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_list_validates_dates() {
        let store = MemoryTransactionStore::new();
        let settings = Settings::default();
        let service = TransactionService::new(&store, &settings);

        let request = ListTransactionsRequest {
            start_date: Some("2024-03-10".to_string()),
            end_date: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert!(service.list(request).unwrap_err().is_validation());

        let request = ListTransactionsRequest {
            start_date: Some("03/01/2024".to_string()),
            ..Default::default()
        };
        assert!(service.list(request).unwrap_err().is_validation());
    }

    #[test]
    fn test_list_uses_settings_page_size() {
        let store = MemoryTransactionStore::new();
        let settings = Settings {
            default_page_size: 2,
            ..Settings::default()
        };
        let service = TransactionService::new(&store, &settings).with_today(today());
        for cents in 1..=3 {
            service.add(expense(cents, None)).unwrap();
        }

        let page = service.list(ListTransactionsRequest::default()).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(service.matching(ListTransactionsRequest::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_edit_partial() {
        let store = MemoryTransactionStore::new();
        let settings = Settings::default();
        let service = TransactionService::new(&store, &settings).with_today(today());
        let txn = service.add(expense(1200, Some("2024-03-01"))).unwrap();

        let edited = service
            .edit(
                txn.id,
                EditTransactionRequest {
                    amount: Some(Money::from_cents(1500)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.amount, Money::from_cents(1500));
        assert_eq!(edited.description, "lunch");
        assert_eq!(edited.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(edited.created_at, txn.created_at);

        let err = service
            .edit(
                txn.id,
                EditTransactionRequest {
                    date: Some("2024-02-30".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service
            .edit(TransactionId::new(42), EditTransactionRequest::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_period_stats_validates_ranges() {
        let store = MemoryTransactionStore::new();
        let settings = Settings::default();
        let service = TransactionService::new(&store, &settings);

        let request = PeriodStatsRequest {
            month: Some(13),
            ..Default::default()
        };
        assert!(service.period_stats(request).unwrap_err().is_validation());

        let request = PeriodStatsRequest {
            granularity: Granularity::Weekly,
            week: Some(0),
            ..Default::default()
        };
        assert!(service.period_stats(request).unwrap_err().is_validation());
    }

    #[test]
    fn test_stats_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AccounterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let storage = Storage::open(paths, &settings).unwrap();
        let service = TransactionService::new(&storage.transactions, &settings);

        service
            .add(AddTransactionRequest {
                user_id: None,
                kind: TransactionType::Income,
                category: Category::Salary,
                description: None,
                amount: Money::from_cents(10000),
                date: Some("2024-03-01".to_string()),
            })
            .unwrap();
        service.add(expense(4000, Some("2024-03-02"))).unwrap();

        let report = service.category_stats(CategoryStatsRequest::default()).unwrap();
        assert_eq!(report.balance, Money::from_cents(6000));

        let report = service
            .period_stats(PeriodStatsRequest {
                year: Some(2024),
                month: Some(3),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(report.periods.len(), 1);
        assert_eq!(report.periods[0].transaction_count, 2);
    }
}
