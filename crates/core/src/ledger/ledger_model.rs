//! Ledger value objects and the pure counter-update primitive.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::campaigns::Campaign;
use crate::errors::{Error, Result, ValidationError};

/// A signed (amount, shares) pair applied atomically to a campaign's
/// aggregate counters. Creation applies a positive delta; cancellation
/// applies the negation, which nets the counters back regardless of what
/// other investments landed in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDelta {
    pub amount: Decimal,
    pub shares: i64,
}

impl LedgerDelta {
    pub fn new(amount: Decimal, shares: i64) -> Self {
        Self { amount, shares }
    }

    /// The reversing delta.
    pub fn negated(&self) -> Self {
        Self {
            amount: -self.amount,
            shares: -self.shares,
        }
    }
}

/// Kind of money movement recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryType {
    Investment,
    Refund,
}

impl LedgerEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Investment => "INVESTMENT",
            LedgerEntryType::Refund => "REFUND",
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerEntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INVESTMENT" => Ok(LedgerEntryType::Investment),
            "REFUND" => Ok(LedgerEntryType::Refund),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown ledger entry type '{}'",
                other
            )))),
        }
    }
}

/// One immutable row per money movement, linked to an investment.
///
/// Append-only: the audit trail stays intact independently of the mutable
/// Campaign aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub investment_id: String,
    pub campaign_id: String,
    pub entry_type: LedgerEntryType,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        investment_id: String,
        campaign_id: String,
        entry_type: LedgerEntryType,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            investment_id,
            campaign_id,
            entry_type,
            amount,
            created_at,
        }
    }
}

/// The ledger update primitive as a pure function: compare-and-swap over a
/// campaign's counters keyed on the version token.
///
/// Returns the updated campaign when `expected_version` matches, `None` when
/// another writer already advanced the version. The returned row carries
/// `version = expected_version + 1`; the caller's previous view is stale and
/// must not be reused for a second call without re-reading.
///
/// The SQLite repository mirrors this function as a conditional `UPDATE`.
pub fn apply_delta(
    campaign: &Campaign,
    delta: &LedgerDelta,
    expected_version: i64,
) -> Option<Campaign> {
    if campaign.version != expected_version {
        return None;
    }
    let mut updated = campaign.clone();
    updated.raised_amount += delta.amount;
    updated.sold_shares += delta.shares;
    updated.version = expected_version + 1;
    Some(updated)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::campaigns::CampaignStatus;

    fn campaign() -> Campaign {
        Campaign {
            id: "c1".to_string(),
            issuer_id: "i1".to_string(),
            name: "Test".to_string(),
            status: CampaignStatus::Live,
            target_amount: dec!(10000),
            raised_amount: dec!(500),
            share_price: dec!(10),
            total_shares: Some(1000),
            sold_shares: 50,
            version: 7,
            start_date: None,
            end_date: None,
            funded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_delta_increments_version_and_counters() {
        let campaign = campaign();
        let delta = LedgerDelta::new(dec!(100), 10);

        let updated = apply_delta(&campaign, &delta, 7).unwrap();

        assert_eq!(updated.raised_amount, dec!(600));
        assert_eq!(updated.sold_shares, 60);
        assert_eq!(updated.version, 8);
        // Untouched fields survive
        assert_eq!(updated.status, CampaignStatus::Live);
        assert_eq!(updated.target_amount, dec!(10000));
    }

    #[test]
    fn test_apply_delta_rejects_stale_version() {
        let campaign = campaign();
        let delta = LedgerDelta::new(dec!(100), 10);

        assert!(apply_delta(&campaign, &delta, 6).is_none());
        assert!(apply_delta(&campaign, &delta, 8).is_none());
    }

    #[test]
    fn test_negated_delta_reverses_exactly() {
        let campaign = campaign();
        let delta = LedgerDelta::new(dec!(250), 25);

        let after_create = apply_delta(&campaign, &delta, 7).unwrap();
        let after_cancel =
            apply_delta(&after_create, &delta.negated(), after_create.version).unwrap();

        assert_eq!(after_cancel.raised_amount, campaign.raised_amount);
        assert_eq!(after_cancel.sold_shares, campaign.sold_shares);
        assert_eq!(after_cancel.version, 9);
    }

    #[test]
    fn test_deltas_commute() {
        // Final counters are the sum of applied deltas regardless of order.
        let campaign = campaign();
        let a = LedgerDelta::new(dec!(100), 10);
        let b = LedgerDelta::new(dec!(30), 3);

        let ab = {
            let first = apply_delta(&campaign, &a, 7).unwrap();
            apply_delta(&first, &b, 8).unwrap()
        };
        let ba = {
            let first = apply_delta(&campaign, &b, 7).unwrap();
            apply_delta(&first, &a, 8).unwrap()
        };

        assert_eq!(ab.raised_amount, ba.raised_amount);
        assert_eq!(ab.sold_shares, ba.sold_shares);
        assert_eq!(ab.version, ba.version);
    }
}
