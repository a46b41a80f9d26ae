//! Category CLI commands

use crate::display::format_category_table;

/// Print the category table
pub fn handle_categories_command() {
    println!("Categories");
    println!("==========");
    println!();
    print!("{}", format_category_table());
    println!("Pass the slug, English name or code wherever a category is expected.");
}
