//! CLI module - Command-line interface for the tracker.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `create-admin` - Seed an administrator account

pub mod args;

pub use args::{Cli, Commands};
