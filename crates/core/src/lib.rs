//! Crowdfund Core - campaign funding ledger and lifecycle engine.
//!
//! This crate contains the concurrency-sensitive heart of the platform:
//! the campaign lifecycle state machine, the investment lifecycle manager,
//! the optimistic-concurrency ledger update primitive and the campaign
//! scheduler. It is database-agnostic and defines repository traits that
//! are implemented by the `storage-sqlite` crate.

pub mod campaigns;
pub mod constants;
pub mod db;
pub mod eligibility;
pub mod errors;
pub mod events;
pub mod investments;
pub mod investors;
pub mod ledger;
pub mod scheduler;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
