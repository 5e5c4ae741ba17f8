//! Database model for campaigns.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crowdfund_core::campaigns::{Campaign, CampaignStatus};
use crowdfund_core::errors::{Error, Result};

use crate::utils::{
    format_datetime, format_datetime_opt, format_decimal, parse_datetime, parse_datetime_opt,
    parse_decimal,
};

/// Database model for campaigns.
///
/// Decimal columns are TEXT so the counters carry exact values; all the
/// compare-and-swap arithmetic happens in the domain layer, never in SQL.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
    Serialize, Deserialize,
)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CampaignDb {
    pub id: String,
    pub issuer_id: String,
    pub name: String,
    pub status: String,
    pub target_amount: String,
    pub raised_amount: String,
    pub share_price: String,
    pub total_shares: Option<i64>,
    pub sold_shares: i64,
    pub version: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub funded_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<CampaignDb> for Campaign {
    type Error = Error;

    fn try_from(db: CampaignDb) -> Result<Self> {
        Ok(Self {
            status: CampaignStatus::from_str(&db.status)?,
            target_amount: parse_decimal(&db.target_amount)?,
            raised_amount: parse_decimal(&db.raised_amount)?,
            share_price: parse_decimal(&db.share_price)?,
            start_date: parse_datetime_opt(db.start_date.as_deref())?,
            end_date: parse_datetime_opt(db.end_date.as_deref())?,
            funded_at: parse_datetime_opt(db.funded_at.as_deref())?,
            created_at: parse_datetime(&db.created_at)?,
            updated_at: parse_datetime(&db.updated_at)?,
            id: db.id,
            issuer_id: db.issuer_id,
            name: db.name,
            total_shares: db.total_shares,
            sold_shares: db.sold_shares,
            version: db.version,
        })
    }
}

impl From<&Campaign> for CampaignDb {
    fn from(domain: &Campaign) -> Self {
        Self {
            id: domain.id.clone(),
            issuer_id: domain.issuer_id.clone(),
            name: domain.name.clone(),
            status: domain.status.as_str().to_string(),
            target_amount: format_decimal(&domain.target_amount),
            raised_amount: format_decimal(&domain.raised_amount),
            share_price: format_decimal(&domain.share_price),
            total_shares: domain.total_shares,
            sold_shares: domain.sold_shares,
            version: domain.version,
            start_date: format_datetime_opt(domain.start_date.as_ref()),
            end_date: format_datetime_opt(domain.end_date.as_ref()),
            funded_at: format_datetime_opt(domain.funded_at.as_ref()),
            created_at: format_datetime(&domain.created_at),
            updated_at: format_datetime(&domain.updated_at),
        }
    }
}
