//! Database model for investors.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crowdfund_core::errors::{Error, Result};
use crowdfund_core::investors::{Investor, KycStatus};

use crate::utils::{format_datetime, parse_datetime};

/// Database model for investors.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::investors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestorDb {
    pub id: String,
    pub display_name: String,
    pub kyc_status: String,
    pub is_deleted: bool,
    pub created_at: String,
}

impl TryFrom<InvestorDb> for Investor {
    type Error = Error;

    fn try_from(db: InvestorDb) -> Result<Self> {
        Ok(Self {
            kyc_status: KycStatus::from_str(&db.kyc_status)?,
            created_at: parse_datetime(&db.created_at)?,
            id: db.id,
            display_name: db.display_name,
            is_deleted: db.is_deleted,
        })
    }
}

impl From<&Investor> for InvestorDb {
    fn from(domain: &Investor) -> Self {
        Self {
            id: domain.id.clone(),
            display_name: domain.display_name.clone(),
            kyc_status: domain.kyc_status.as_str().to_string(),
            is_deleted: domain.is_deleted,
            created_at: format_datetime(&domain.created_at),
        }
    }
}
