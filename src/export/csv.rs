//! CSV Export functionality
//!
//! One row per transaction, amounts as decimal strings so spreadsheets keep
//! both fractional digits.

use serde::Serialize;
use std::io::Write;

use crate::error::AccounterResult;
use crate::models::Transaction;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Category Code")]
    category_code: i32,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Created At")]
    created_at: String,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.value(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.slug(),
            category: txn.category.label(),
            category_code: txn.category.code(),
            amount: txn.amount.to_string(),
            description: &txn.description,
            created_at: txn.created_at.to_rfc3339(),
        }
    }
}

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> AccounterResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        // serialize() only emits headers with the first record
        csv_writer.write_record([
            "ID",
            "Date",
            "Type",
            "Category",
            "Category Code",
            "Amount",
            "Description",
            "Created At",
        ])?;
    }

    for txn in transactions {
        csv_writer.serialize(CsvRow::from(txn))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewTransaction, TransactionId, TransactionType, UserId};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_export_quotes_descriptions() {
        let input = NewTransaction::new(
            UserId::new(1),
            TransactionType::Expense,
            Category::Food,
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .with_description("noodles, extra \"spicy\"");
        let txn = Transaction::from_new(TransactionId::new(9), input, Utc::now());

        let mut buffer = Vec::new();
        export_transactions_csv(&[txn], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Date,Type,Category,Category Code,Amount,Description,Created At"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("9,2024-03-01,expense,餐饮,0,12.50,"));
        assert!(row.contains("\"noodles, extra \"\"spicy\"\"\""));
    }

    #[test]
    fn test_export_empty_has_header() {
        let mut buffer = Vec::new();
        export_transactions_csv(&[], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
