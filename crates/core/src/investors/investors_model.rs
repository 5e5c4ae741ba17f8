//! Investor domain models.
//!
//! Profile editing and KYC document handling live elsewhere; the funding
//! core only needs existence, soft-delete state and KYC status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// KYC verification status of an investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    #[default]
    NotStarted,
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::NotStarted => "NOT_STARTED",
            KycStatus::Pending => "PENDING",
            KycStatus::Approved => "APPROVED",
            KycStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KycStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NOT_STARTED" => Ok(KycStatus::NotStarted),
            "PENDING" => Ok(KycStatus::Pending),
            "APPROVED" => Ok(KycStatus::Approved),
            "REJECTED" => Ok(KycStatus::Rejected),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown KYC status '{}'",
                other
            )))),
        }
    }
}

/// Domain model for an investor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub display_name: String,
    pub kyc_status: KycStatus,
    /// Soft-deleted investors may not create or cancel investments.
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}
