//! Category table display

use crate::models::{Category, TransactionType};

/// Format the fixed category table, grouped by usual transaction type
pub fn format_category_table() -> String {
    let mut output = String::new();

    for kind in [TransactionType::Expense, TransactionType::Income] {
        output.push_str(&format!("{} ({})\n", kind.label(), kind.slug()));
        output.push_str(&format!("  {:>4}  {:<16} {}\n", "Code", "Slug", "Name"));
        output.push_str(&format!("  {}\n", "-".repeat(34)));

        for category in Category::ALL.iter().filter(|c| c.usual_type() == kind) {
            output.push_str(&format!(
                "  {:>4}  {:<16} {}\n",
                category.code(),
                category.slug(),
                category.label()
            ));
        }
        output.push('\n');
    }

    output
}
