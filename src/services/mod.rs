//! Service layer for Accounter
//!
//! The service layer sits between the command line and the storage, query
//! and report layers, handling request parsing and validation.

pub mod transaction;

pub use transaction::{
    AddTransactionRequest, CategoryStatsRequest, EditTransactionRequest,
    ListTransactionsRequest, PeriodStatsRequest, TransactionService,
};
