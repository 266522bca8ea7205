//! Project tracker - projects, tasks and assignments behind a role-based
//! permission policy.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Configuration loaded from the environment
//! - **repository**: SeaORM entities and repositories
//! - **infra**: Database connection, migrations and the Unit of Work
//! - **services**: Use cases; each runs inside one transaction
//! - **api**: HTTP handlers, middleware and routes
//!
//! Domain types and the permission policy live in the `domain` crate;
//! errors and shared configuration in `common`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -p tracker -- serve
//!
//! # Run migrations
//! cargo run -p tracker -- migrate up
//!
//! # Seed the first administrator
//! cargo run -p tracker -- create-admin --username root --password changeme
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod services;

pub use api::{create_router, AppState};
pub use config::TrackerConfig;
pub use infra::Database;
pub use services::{ServiceContainer, Services};
