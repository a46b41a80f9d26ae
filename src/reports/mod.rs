//! Reports module for Accounter
//!
//! Aggregations over a user's transactions: totals per category and totals
//! per calendar period.

pub mod category;
pub mod period;

pub use category::{CategoryReport, CategoryStat, StatsFilter};
pub use period::{PeriodData, PeriodFilter, PeriodReport};
