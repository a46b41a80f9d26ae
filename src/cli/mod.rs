//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod export;
pub mod stats;
pub mod transaction;

pub use category::handle_categories_command;
pub use export::{handle_export_command, ExportFormat};
pub use stats::{handle_stats_command, StatsCommands};
pub use transaction::{handle_transaction_command, FilterArgs, TransactionCommands};
