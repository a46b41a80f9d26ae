//! Period Report
//!
//! Buckets a user's income and expense by ISO week, month or year.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::AccounterResult;
use crate::models::{Granularity, Money, Period, UserId};
use crate::storage::TransactionStore;

/// Which records a period report covers, and how they are bucketed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFilter {
    pub user_id: UserId,
    pub granularity: Granularity,
    /// Calendar year, or ISO week-year for weekly buckets
    pub year: Option<i32>,
    /// Only used for monthly buckets
    pub month: Option<u32>,
    /// Only used for weekly buckets
    pub week: Option<u32>,
}

impl PeriodFilter {
    pub fn new(user_id: UserId, granularity: Granularity) -> Self {
        Self {
            user_id,
            granularity,
            year: None,
            month: None,
            week: None,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn week(mut self, week: u32) -> Self {
        self.week = Some(week);
        self
    }

    fn accepts(&self, period: &Period) -> bool {
        if self.year.is_some_and(|year| period.year() != year) {
            return false;
        }
        match *period {
            Period::Monthly { month, .. } => self.month.map_or(true, |m| m == month),
            Period::Weekly { week, .. } => self.week.map_or(true, |w| w == week),
            Period::Yearly { .. } => true,
        }
    }
}

/// Totals for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodData {
    #[serde(skip)]
    pub period: Period,
    pub period_name: String,
    pub income: Money,
    pub expense: Money,
    /// `income - expense`
    pub balance: Money,
    pub transaction_count: usize,
}

impl PeriodData {
    fn new(period: Period) -> Self {
        Self {
            period,
            period_name: period.label(),
            income: Money::zero(),
            expense: Money::zero(),
            balance: Money::zero(),
            transaction_count: 0,
        }
    }
}

/// Income and expense per period, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    pub user_id: UserId,
    pub granularity: Granularity,
    pub periods: Vec<PeriodData>,
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub transaction_count: usize,
}

impl PeriodReport {
    /// Generate a period report
    pub fn generate(store: &dyn TransactionStore, filter: &PeriodFilter) -> AccounterResult<Self> {
        let mut buckets: BTreeMap<Period, PeriodData> = BTreeMap::new();

        store.scan(&mut |txn| {
            if txn.user_id != filter.user_id {
                return;
            }
            let period = filter.granularity.period_for(txn.date);
            if !filter.accepts(&period) {
                return;
            }

            let data = buckets
                .entry(period)
                .or_insert_with(|| PeriodData::new(period));
            if txn.is_income() {
                data.income += txn.amount;
            } else {
                data.expense += txn.amount;
            }
            data.balance = data.income - data.expense;
            data.transaction_count += 1;
        })?;

        let periods: Vec<PeriodData> = buckets.into_values().collect();
        let total_income: Money = periods.iter().map(|p| p.income).sum();
        let total_expense: Money = periods.iter().map(|p| p.expense).sum();
        let transaction_count = periods.iter().map(|p| p.transaction_count).sum();

        Ok(Self {
            user_id: filter.user_id,
            granularity: filter.granularity,
            periods,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            transaction_count,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Period Report ({}) for user {}\n",
            self.granularity, self.user_id
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14} {:>14} {:>14} {:>8}\n",
            "Period", "Income", "Expense", "Balance", "Count"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.periods.is_empty() {
            output.push_str("No transactions in this range.\n");
        }

        for data in &self.periods {
            output.push_str(&format!(
                "{:<16} {:>14} {:>14} {:>14} {:>8}\n",
                data.period_name,
                data.income.format_with_symbol(currency),
                data.expense.format_with_symbol(currency),
                data.balance.format_with_symbol(currency),
                data.transaction_count
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14} {:>14} {:>14} {:>8}\n",
            "TOTAL",
            self.total_income.format_with_symbol(currency),
            self.total_expense.format_with_symbol(currency),
            self.balance.format_with_symbol(currency),
            self.transaction_count
        ));

        output
    }
}
