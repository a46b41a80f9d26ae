//! Category Report
//!
//! Sums income and expense per category for one user, optionally restricted
//! to a date range.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::AccounterResult;
use crate::models::{Category, Money, TransactionType, UserId};
use crate::storage::TransactionStore;

/// Which records a category report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFilter {
    pub user_id: UserId,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl StatsFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            start_date: None,
            end_date: None,
        }
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

/// Total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub category_name: &'static str,
    pub amount: Money,
    pub count: usize,
}

/// Income and expense broken down by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub user_id: UserId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Sorted by amount, largest first
    pub income_by_category: Vec<CategoryStat>,
    /// Sorted by amount, largest first
    pub expense_by_category: Vec<CategoryStat>,
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`
    pub balance: Money,
}

impl CategoryReport {
    /// Generate a category report
    pub fn generate(store: &dyn TransactionStore, filter: &StatsFilter) -> AccounterResult<Self> {
        let mut sums: HashMap<(TransactionType, Category), (Money, usize)> = HashMap::new();

        store.scan(&mut |txn| {
            if txn.user_id != filter.user_id || !filter.contains(txn.date) {
                return;
            }
            let entry = sums
                .entry((txn.kind, txn.category))
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        })?;

        let mut income_by_category = Vec::new();
        let mut expense_by_category = Vec::new();

        for ((kind, category), (amount, count)) in sums {
            let stat = CategoryStat {
                category,
                category_name: category.label(),
                amount,
                count,
            };
            match kind {
                TransactionType::Income => income_by_category.push(stat),
                TransactionType::Expense => expense_by_category.push(stat),
            }
        }

        sort_stats(&mut income_by_category);
        sort_stats(&mut expense_by_category);

        let total_income: Money = income_by_category.iter().map(|s| s.amount).sum();
        let total_expense: Money = expense_by_category.iter().map(|s| s.amount).sum();

        Ok(Self {
            user_id: filter.user_id,
            start_date: filter.start_date,
            end_date: filter.end_date,
            income_by_category,
            expense_by_category,
            total_income,
            total_expense,
            balance: total_income - total_expense,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.income_by_category.is_empty() && self.expense_by_category.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        let range = match (self.start_date, self.end_date) {
            (None, None) => "all dates".to_string(),
            (start, end) => format!(
                "{} to {}",
                start.map_or("…".to_string(), |d| d.to_string()),
                end.map_or("…".to_string(), |d| d.to_string())
            ),
        };

        output.push_str(&format!(
            "Category Report for user {} ({})\n",
            self.user_id, range
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for (title, stats, total) in [
            ("INCOME", &self.income_by_category, self.total_income),
            ("EXPENSE", &self.expense_by_category, self.total_expense),
        ] {
            output.push_str(&format!("\n{}\n", title));
            output.push_str(&format!("{:<30} {:>16} {:>8}\n", "Category", "Amount", "Count"));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            if stats.is_empty() {
                output.push_str("  (none)\n");
            }
            for stat in stats {
                output.push_str(&format!(
                    "{:<30} {:>16} {:>8}\n",
                    stat.category_name,
                    stat.amount.format_with_symbol(currency),
                    stat.count
                ));
            }
            output.push_str(&format!(
                "{:<30} {:>16}\n",
                "Total:",
                total.format_with_symbol(currency)
            ));
        }

        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>16}\n",
            "BALANCE",
            self.balance.format_with_symbol(currency)
        ));

        output
    }
}

fn sort_stats(stats: &mut [CategoryStat]) {
    stats.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.code().cmp(&b.category.code()))
    });
}
