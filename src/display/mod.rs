//! Display formatting for terminal output
//!
//! Reports format themselves; this module covers transactions and the
//! category table.

pub mod category;
pub mod transaction;

pub use category::format_category_table;
pub use transaction::{
    format_transaction_details, format_transaction_page, format_transaction_register,
    format_transaction_row,
};
