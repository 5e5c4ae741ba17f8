//! SQLite storage implementation for the crowdfund ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `crowdfund-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for campaigns, investments, ledger entries
//!   and investors
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place where Diesel repository code exists; the
//! core crate works with traits and touches Diesel only through the
//! transaction-executor seam.

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod campaigns;
pub mod investments;
pub mod investors;
pub mod ledger;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, run_migrations, DbConnection, DbPool, DieselTransactionExecutor,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from crowdfund-core for convenience
pub use crowdfund_core::errors::{DatabaseError, Error, Result};
