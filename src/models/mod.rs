//! Core data models for Accounter
//!
//! Transactions, the closed category and type sets, money amounts and
//! calendar periods.

pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{category_name, Category, CodeError, TransactionType, UNKNOWN_CATEGORY_LABEL};
pub use ids::{TransactionId, UserId};
pub use money::Money;
pub use period::{Granularity, Period};
pub use transaction::{NewTransaction, Transaction, TransactionValidationError};
