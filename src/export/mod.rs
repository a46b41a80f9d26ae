//! Export module for Accounter
//!
//! Writes (optionally filtered) transactions in two formats:
//! - CSV: spreadsheet-compatible rows
//! - JSON: machine-readable document with metadata

pub mod csv;
pub mod json;

pub use csv::export_transactions_csv;
pub use json::{export_transactions_json, TransactionExport, EXPORT_SCHEMA_VERSION};
