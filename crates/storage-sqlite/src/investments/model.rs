//! Database model for investments.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crowdfund_core::errors::{Error, Result};
use crowdfund_core::investments::{Investment, InvestmentStatus, PaymentMethod};

use crate::utils::{
    format_datetime, format_datetime_opt, format_decimal, parse_datetime, parse_datetime_opt,
    parse_decimal,
};

/// Database model for investments.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
    Serialize, Deserialize,
)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentDb {
    pub id: String,
    pub investor_id: String,
    pub campaign_id: String,
    pub amount: String,
    pub shares: i64,
    pub share_price: String,
    pub status: String,
    pub payment_method: String,
    pub cooling_off_expires_at: String,
    pub cancelled_at: Option<String>,
    pub completed_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<InvestmentDb> for Investment {
    type Error = Error;

    fn try_from(db: InvestmentDb) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount)?,
            share_price: parse_decimal(&db.share_price)?,
            status: InvestmentStatus::from_str(&db.status)?,
            payment_method: PaymentMethod::from_str(&db.payment_method)?,
            cooling_off_expires_at: parse_datetime(&db.cooling_off_expires_at)?,
            cancelled_at: parse_datetime_opt(db.cancelled_at.as_deref())?,
            completed_at: parse_datetime_opt(db.completed_at.as_deref())?,
            created_at: parse_datetime(&db.created_at)?,
            updated_at: parse_datetime(&db.updated_at)?,
            id: db.id,
            investor_id: db.investor_id,
            campaign_id: db.campaign_id,
            shares: db.shares,
            cancellation_reason: db.cancellation_reason,
        })
    }
}

impl From<&Investment> for InvestmentDb {
    fn from(domain: &Investment) -> Self {
        Self {
            id: domain.id.clone(),
            investor_id: domain.investor_id.clone(),
            campaign_id: domain.campaign_id.clone(),
            amount: format_decimal(&domain.amount),
            shares: domain.shares,
            share_price: format_decimal(&domain.share_price),
            status: domain.status.as_str().to_string(),
            payment_method: domain.payment_method.as_str().to_string(),
            cooling_off_expires_at: format_datetime(&domain.cooling_off_expires_at),
            cancelled_at: format_datetime_opt(domain.cancelled_at.as_ref()),
            completed_at: format_datetime_opt(domain.completed_at.as_ref()),
            cancellation_reason: domain.cancellation_reason.clone(),
            created_at: format_datetime(&domain.created_at),
            updated_at: format_datetime(&domain.updated_at),
        }
    }
}
