//! Configuration module for Accounter
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AccounterPaths;
pub use settings::Settings;
