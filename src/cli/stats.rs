//! Statistics CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{AccounterError, AccounterResult};
use crate::models::{Granularity, UserId};
use crate::services::{CategoryStatsRequest, PeriodStatsRequest, TransactionService};
use crate::storage::TransactionStore;

/// Statistics subcommands
#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Income and expense per category
    #[command(alias = "cat")]
    Categories {
        /// User ID (defaults to the configured user)
        #[arg(short, long)]
        user: Option<UserId>,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Income and expense per week, month or year
    Periods {
        /// weekly, monthly or yearly
        granularity: Granularity,
        /// User ID (defaults to the configured user)
        #[arg(short, long)]
        user: Option<UserId>,
        /// Year (ISO week-year for weekly)
        #[arg(short, long)]
        year: Option<i32>,
        /// Month, 1-12 (monthly only)
        #[arg(short, long)]
        month: Option<u32>,
        /// ISO week, 1-53 (weekly only)
        #[arg(short, long)]
        week: Option<u32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Handle a statistics command
pub fn handle_stats_command(
    store: &dyn TransactionStore,
    settings: &Settings,
    cmd: StatsCommands,
) -> AccounterResult<()> {
    let service = TransactionService::new(store, settings);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        StatsCommands::Categories {
            user,
            from,
            to,
            json,
        } => {
            let report = service.category_stats(CategoryStatsRequest {
                user_id: user,
                start_date: from,
                end_date: to,
            })?;

            if json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", report.format_terminal(currency));
            }
        }

        StatsCommands::Periods {
            granularity,
            user,
            year,
            month,
            week,
            json,
        } => {
            let report = service.period_stats(PeriodStatsRequest {
                user_id: user,
                granularity,
                year,
                month,
                week,
            })?;

            if json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", report.format_terminal(currency));
            }
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> AccounterResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AccounterError::Json(e.to_string()))
}
