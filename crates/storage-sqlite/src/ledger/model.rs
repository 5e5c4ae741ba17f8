//! Database model for ledger entries.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crowdfund_core::errors::{Error, Result};
use crowdfund_core::ledger::{LedgerEntry, LedgerEntryType};

use crate::utils::{format_datetime, format_decimal, parse_datetime, parse_decimal};

/// Database model for ledger entries. Rows are append-only; there is no
/// `AsChangeset` derive on purpose.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDb {
    pub id: String,
    pub investment_id: String,
    pub campaign_id: String,
    pub entry_type: String,
    pub amount: String,
    pub created_at: String,
}

impl TryFrom<LedgerEntryDb> for LedgerEntry {
    type Error = Error;

    fn try_from(db: LedgerEntryDb) -> Result<Self> {
        Ok(Self {
            entry_type: LedgerEntryType::from_str(&db.entry_type)?,
            amount: parse_decimal(&db.amount)?,
            created_at: parse_datetime(&db.created_at)?,
            id: db.id,
            investment_id: db.investment_id,
            campaign_id: db.campaign_id,
        })
    }
}

impl From<&LedgerEntry> for LedgerEntryDb {
    fn from(domain: &LedgerEntry) -> Self {
        Self {
            id: domain.id.clone(),
            investment_id: domain.investment_id.clone(),
            campaign_id: domain.campaign_id.clone(),
            entry_type: domain.entry_type.as_str().to_string(),
            amount: format_decimal(&domain.amount),
            created_at: format_datetime(&domain.created_at),
        }
    }
}
