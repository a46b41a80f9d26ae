//! Transaction CLI commands
//!
//! Implements the add/list/show/edit/delete commands.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_page};
use crate::error::AccounterResult;
use crate::models::{Category, Money, TransactionId, TransactionType, UserId};
use crate::services::{
    AddTransactionRequest, EditTransactionRequest, ListTransactionsRequest, TransactionService,
};
use crate::storage::TransactionStore;

/// Filters shared by `list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// User ID (defaults to the configured user)
    #[arg(short, long)]
    pub user: Option<UserId>,

    /// Only income or only expense
    #[arg(short = 't', long = "type")]
    pub kind: Option<TransactionType>,

    /// Category slug, name or code
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<String>,
}

impl FilterArgs {
    pub fn into_request(self) -> ListTransactionsRequest {
        ListTransactionsRequest {
            user_id: self.user,
            kind: self.kind,
            category: self.category,
            start_date: self.from,
            end_date: self.to,
            page: None,
            page_size: None,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// income or expense
        #[arg(value_name = "TYPE")]
        kind: TransactionType,
        /// Category slug, name or code (see `accounter categories`)
        category: Category,
        /// Amount, e.g. "12.50"
        #[arg(allow_hyphen_values = true)]
        amount: Money,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(long = "desc")]
        description: Option<String>,
        /// User ID (defaults to the configured user)
        #[arg(short, long)]
        user: Option<UserId>,
    },

    /// List transactions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Page number, starting at 1
        #[arg(short, long)]
        page: Option<usize>,
        /// Transactions per page
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        /// New category
        #[arg(short, long)]
        category: Option<Category>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<Money>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &dyn TransactionStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> AccounterResult<()> {
    let service = TransactionService::new(store, settings);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            amount,
            date,
            description,
            user,
        } => {
            let txn = service.add(AddTransactionRequest {
                user_id: user,
                kind,
                category,
                description,
                amount,
                date,
            })?;

            println!("Recorded transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Type:     {}", txn.kind.label());
            println!("  Category: {}", txn.category.label());
            println!("  Amount:   {}", txn.amount.format_with_symbol(currency));
            if !txn.description.is_empty() {
                println!("  Desc:     {}", txn.description);
            }
        }

        TransactionCommands::List {
            filter,
            page,
            page_size,
        } => {
            let mut request = filter.into_request();
            request.page = page;
            request.page_size = page_size;

            let page = service.list(request)?;
            print!("{}", format_transaction_page(&page, currency));
        }

        TransactionCommands::Show { id } => {
            let txn = service.get(id)?;
            print!("{}", format_transaction_details(&txn, currency));
        }

        TransactionCommands::Edit {
            id,
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let request = EditTransactionRequest {
                kind,
                category,
                description,
                amount,
                date,
            };
            if request.is_empty() {
                println!("Nothing to change. Pass --type, --category, --amount, --date or --desc.");
                return Ok(());
            }

            let updated = service.edit(id, request)?;
            println!("Updated transaction: {}", updated.id);
            print!("{}", format_transaction_details(&updated, currency));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.get(id)?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, currency));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: {} ({} {})",
                deleted.id,
                deleted.date,
                deleted.amount.format_with_symbol(currency)
            );
        }
    }

    Ok(())
}
