use std::sync::Arc;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crowdfund_core::errors::Result;
use crowdfund_core::ledger::{LedgerEntry, LedgerEntryRepositoryTrait};

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::ledger_entries;
use crate::schema::ledger_entries::dsl::*;

use super::model::LedgerEntryDb;

/// Repository for the append-only ledger entry store.
pub struct LedgerEntryRepository {
    pool: Arc<DbPool>,
}

impl LedgerEntryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl LedgerEntryRepositoryTrait for LedgerEntryRepository {
    fn record_in_transaction(
        &self,
        entry: LedgerEntry,
        conn: &mut SqliteConnection,
    ) -> Result<LedgerEntry> {
        let row = LedgerEntryDb::from(&entry);
        diesel::insert_into(ledger_entries::table)
            .values(&row)
            .execute(conn)
            .map_err(IntoCore::into_core)?;
        Ok(entry)
    }

    fn list_by_investment(&self, investment: &str) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = ledger_entries
            .select(LedgerEntryDb::as_select())
            .filter(investment_id.eq(investment))
            .order(created_at.asc())
            .load::<LedgerEntryDb>(&mut conn)
            .map_err(IntoCore::into_core)?;

        rows.into_iter().map(LedgerEntry::try_from).collect()
    }

    fn list_by_campaign(&self, campaign: &str) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = ledger_entries
            .select(LedgerEntryDb::as_select())
            .filter(campaign_id.eq(campaign))
            .order(created_at.asc())
            .load::<LedgerEntryDb>(&mut conn)
            .map_err(IntoCore::into_core)?;

        rows.into_iter().map(LedgerEntry::try_from).collect()
    }
}
