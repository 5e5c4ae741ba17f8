//! Ledger module - the campaign counter update primitive and the immutable
//! per-movement ledger entries.

mod ledger_model;
mod ledger_traits;

pub use ledger_model::{apply_delta, LedgerDelta, LedgerEntry, LedgerEntryType};
pub use ledger_traits::LedgerEntryRepositoryTrait;
