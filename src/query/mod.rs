//! Transaction filtering and pagination
//!
//! Filters are conjunctive: every predicate that is set must hold, and unset
//! predicates match everything. Matches come back in storage order.

pub mod filter;
pub mod page;

pub use filter::TransactionFilter;
pub use page::Page;
