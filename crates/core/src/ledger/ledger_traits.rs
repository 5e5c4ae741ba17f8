//! Ledger entry repository trait.

use diesel::sqlite::SqliteConnection;

use super::ledger_model::LedgerEntry;
use crate::errors::Result;

/// Trait defining the contract for the append-only ledger entry store.
///
/// Entries are written in the same transaction as the investment row and
/// the campaign counter update, so the recording method takes the open
/// connection. Entries are never updated or deleted.
pub trait LedgerEntryRepositoryTrait: Send + Sync {
    /// Appends a ledger entry inside an open transaction.
    fn record_in_transaction(
        &self,
        entry: LedgerEntry,
        conn: &mut SqliteConnection,
    ) -> Result<LedgerEntry>;

    /// Lists entries for one investment, oldest first.
    fn list_by_investment(&self, investment_id: &str) -> Result<Vec<LedgerEntry>>;

    /// Lists entries for one campaign, oldest first.
    fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<LedgerEntry>>;
}
