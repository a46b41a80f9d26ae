//! Accounter - Terminal-based personal income and expense tracker
//!
//! This library provides the core functionality for the Accounter
//! application: recording income and expense transactions, listing them with
//! filters and pagination, and summarizing them by category or by week,
//! month and year.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money, periods)
//! - `storage`: Transaction stores (JSON file and in-memory)
//! - `query`: Transaction filters and pagination
//! - `reports`: Category and period statistics
//! - `services`: Request handling on top of storage, query and reports
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use accounter::config::{paths::AccounterPaths, settings::Settings};
//! use accounter::storage::Storage;
//!
//! let paths = AccounterPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, &settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod query;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{AccounterError, AccounterResult};
