//! SQLite storage implementation for the append-only ledger.

mod model;
mod repository;

pub use model::LedgerEntryDb;
pub use repository::LedgerEntryRepository;
