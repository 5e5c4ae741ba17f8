//! Campaign domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle status of a campaign.
///
/// Transitions between statuses are owned exclusively by the state machine
/// in [`crate::campaigns::state_machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Draft,
    Review,
    Live,
    Funded,
    Closed,
    Cancelled,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "DRAFT",
            CampaignStatus::Review => "REVIEW",
            CampaignStatus::Live => "LIVE",
            CampaignStatus::Funded => "FUNDED",
            CampaignStatus::Closed => "CLOSED",
            CampaignStatus::Cancelled => "CANCELLED",
        }
    }

    /// CANCELLED is the only terminal status; every other status still has
    /// at least one outgoing transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CampaignStatus::Cancelled)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DRAFT" => Ok(CampaignStatus::Draft),
            "REVIEW" => Ok(CampaignStatus::Review),
            "LIVE" => Ok(CampaignStatus::Live),
            "FUNDED" => Ok(CampaignStatus::Funded),
            "CLOSED" => Ok(CampaignStatus::Closed),
            "CANCELLED" => Ok(CampaignStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown campaign status '{}'",
                other
            )))),
        }
    }
}

/// Domain model for a fundraising campaign.
///
/// `raised_amount`, `sold_shares` and `version` are the contended fields;
/// every mutation of them goes through the ledger update primitive
/// ([`crate::ledger::apply_delta`]). `version` increments on every
/// successful ledger write and gates stale writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub issuer_id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub target_amount: Decimal,
    pub raised_amount: Decimal,
    /// Price of one share, fixed for the campaign's lifetime.
    pub share_price: Decimal,
    /// Optional cap on the share pool. `None` means uncapped.
    pub total_shares: Option<i64>,
    pub sold_shares: i64,
    /// Optimistic-concurrency token.
    pub version: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub funded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Whether the raised amount has met or exceeded the target.
    pub fn target_reached(&self) -> bool {
        self.raised_amount >= self.target_amount
    }

    /// Shares still available in the pool, if the pool is capped.
    pub fn remaining_shares(&self) -> Option<i64> {
        self.total_shares.map(|total| total - self.sold_shares)
    }

    /// Whether the end date lies strictly before the given instant.
    pub fn ended_before(&self, instant: DateTime<Utc>) -> bool {
        self.end_date.map(|end| end < instant).unwrap_or(false)
    }
}

/// Input model for creating a new campaign. Campaigns always start in DRAFT.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub issuer_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub share_price: Decimal,
    pub total_shares: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl NewCampaign {
    /// Validates the new campaign data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Campaign name cannot be empty".to_string(),
            )));
        }
        if self.issuer_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "issuerId".to_string(),
            )));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Target amount must be positive".to_string(),
            )));
        }
        if self.share_price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Share price must be positive".to_string(),
            )));
        }
        if let Some(total) = self.total_shares {
            if total <= 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Total shares must be positive when set".to_string(),
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end <= start {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "End date must be after start date".to_string(),
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_new_campaign() -> NewCampaign {
        NewCampaign {
            id: None,
            issuer_id: "issuer1".to_string(),
            name: "Solar Farm Series A".to_string(),
            target_amount: dec!(100000),
            share_price: dec!(10),
            total_shares: Some(10000),
            start_date: Some(Utc::now()),
            end_date: Some(Utc::now() + Duration::days(30)),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            CampaignStatus::Draft,
            CampaignStatus::Review,
            CampaignStatus::Live,
            CampaignStatus::Funded,
            CampaignStatus::Closed,
            CampaignStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<CampaignStatus>().unwrap(), status);
        }
        assert!("PAUSED".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn test_validate_accepts_valid_campaign() {
        assert!(valid_new_campaign().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_share_price() {
        let mut campaign = valid_new_campaign();
        campaign.share_price = Decimal::ZERO;
        assert!(campaign.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let mut campaign = valid_new_campaign();
        campaign.end_date = Some(campaign.start_date.unwrap() - Duration::days(1));
        assert!(campaign.validate().is_err());
    }

    #[test]
    fn test_target_reached_boundary() {
        let mut campaign = Campaign {
            id: "c1".to_string(),
            issuer_id: "i1".to_string(),
            name: "c".to_string(),
            status: CampaignStatus::Live,
            target_amount: dec!(1000),
            raised_amount: dec!(999.99),
            share_price: dec!(10),
            total_shares: None,
            sold_shares: 0,
            version: 0,
            start_date: None,
            end_date: None,
            funded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!campaign.target_reached());
        campaign.raised_amount = dec!(1000);
        assert!(campaign.target_reached());
    }
}
