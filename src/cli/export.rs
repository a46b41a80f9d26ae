//! CLI commands for data export

use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::error;

use super::transaction::FilterArgs;
use crate::config::Settings;
use crate::error::{AccounterError, AccounterResult};
use crate::export::{export_transactions_csv, export_transactions_json};
use crate::services::TransactionService;
use crate::storage::TransactionStore;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV rows, one per transaction
    Csv,
    /// JSON document with metadata
    Json,
}

/// Handle the export command
///
/// Writes to `output` when given, otherwise to stdout.
pub fn handle_export_command(
    store: &dyn TransactionStore,
    settings: &Settings,
    format: ExportFormat,
    output: Option<PathBuf>,
    filter: FilterArgs,
) -> AccounterResult<()> {
    let service = TransactionService::new(store, settings);
    let transactions = service.matching(filter.into_request())?;
    let count = transactions.len();

    let writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                error!(path = %path.display(), error = %e, "failed to create export file");
                AccounterError::Export(format!("Failed to create output file: {}", e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv => export_transactions_csv(&transactions, writer)?,
        ExportFormat::Json => {
            let mut writer = writer;
            export_transactions_json(transactions, &mut writer, true)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    if let Some(path) = output {
        println!("Exported {} transactions to: {}", count, path.display());
    }

    Ok(())
}
