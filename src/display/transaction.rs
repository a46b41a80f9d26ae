//! Transaction display formatting
//!
//! Register-style rows and detail views for the terminal.

use crate::models::{Transaction, TransactionType};
use crate::query::Page;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency: &str) -> String {
    let sign = match txn.kind {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    format!(
        "{:>6} {} {} {} {:>14} {}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        pad(txn.kind.label(), 4),
        pad(txn.category.label(), 8),
        format!("{}{}", sign, txn.amount.format_with_symbol(currency)),
        truncate(&txn.description, 30)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6} {:10} {} {} {:>14} {}\n",
        "ID",
        "Date",
        pad("Type", 4),
        pad("Category", 8),
        "Amount",
        "Description"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency));
        output.push('\n');
    }

    output
}

/// Register plus a page footer
pub fn format_transaction_page(page: &Page<Transaction>, currency: &str) -> String {
    let mut output = format_transaction_register(&page.items, currency);

    if page.total > 0 {
        output.push_str(&format!(
            "\nPage {} of {} ({} transaction{})\n",
            page.page,
            page.page_count().max(1),
            page.total,
            if page.total == 1 { "" } else { "s" }
        ));
    }
    if page.has_next() {
        output.push_str(&format!("Use --page {} for more.\n", page.page + 1));
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("User:        {}\n", txn.user_id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Type:        {} ({})\n",
        txn.kind.label(),
        txn.kind.slug()
    ));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        txn.category.label(),
        txn.category.slug()
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Display width of a string, counting CJK characters as two columns
pub(crate) fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}

/// Left-align `s` in `width` columns
pub(crate) fn pad(s: &str, width: usize) -> String {
    let used = display_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

/// Truncate a string to at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
