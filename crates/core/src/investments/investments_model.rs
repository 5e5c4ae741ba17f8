//! Investment domain models and share math.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle status of an investment.
///
/// Terminal states: COMPLETED, CANCELLED, REFUNDED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentStatus {
    Pending,
    PaymentInitiated,
    CoolingOff,
    Completed,
    Cancelled,
    Refunded,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Pending => "PENDING",
            InvestmentStatus::PaymentInitiated => "PAYMENT_INITIATED",
            InvestmentStatus::CoolingOff => "COOLING_OFF",
            InvestmentStatus::Completed => "COMPLETED",
            InvestmentStatus::Cancelled => "CANCELLED",
            InvestmentStatus::Refunded => "REFUNDED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InvestmentStatus::Completed | InvestmentStatus::Cancelled | InvestmentStatus::Refunded
        )
    }

    /// Statuses whose amounts count toward the campaign's raised amount and
    /// sold shares. CANCELLED and REFUNDED investments were reversed out of
    /// the ledger at cancellation time.
    pub fn counts_toward_ledger(&self) -> bool {
        matches!(
            self,
            InvestmentStatus::Pending
                | InvestmentStatus::CoolingOff
                | InvestmentStatus::PaymentInitiated
                | InvestmentStatus::Completed
        )
    }

    /// Statuses from which the investor may still cancel (subject to the
    /// cooling-off deadline).
    pub fn is_cancellable(&self) -> bool {
        matches!(self, InvestmentStatus::Pending | InvestmentStatus::CoolingOff)
    }

    /// Statuses from which payment confirmation may complete the investment.
    pub fn is_completable(&self) -> bool {
        matches!(
            self,
            InvestmentStatus::Pending
                | InvestmentStatus::CoolingOff
                | InvestmentStatus::PaymentInitiated
        )
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(InvestmentStatus::Pending),
            "PAYMENT_INITIATED" => Ok(InvestmentStatus::PaymentInitiated),
            "COOLING_OFF" => Ok(InvestmentStatus::CoolingOff),
            "COMPLETED" => Ok(InvestmentStatus::Completed),
            "CANCELLED" => Ok(InvestmentStatus::Cancelled),
            "REFUNDED" => Ok(InvestmentStatus::Refunded),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown investment status '{}'",
                other
            )))),
        }
    }
}

/// Recognized payment methods for funding an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Wallet => "WALLET",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CARD" => Ok(PaymentMethod::Card),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            "WALLET" => Ok(PaymentMethod::Wallet),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unrecognized payment method '{}'",
                other
            )))),
        }
    }
}

/// Domain model for an individual investment.
///
/// `amount == shares * share_price` exactly; shares come from floor
/// division of the requested amount (see [`compute_shares`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub investor_id: String,
    pub campaign_id: String,
    pub amount: Decimal,
    pub shares: i64,
    /// Share price captured from the campaign at creation time.
    pub share_price: Decimal,
    pub status: InvestmentStatus,
    pub payment_method: PaymentMethod,
    pub cooling_off_expires_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub investor_id: String,
    pub campaign_id: String,
    /// The amount the investor asked to invest. The amount actually charged
    /// is `shares * share_price`, never more.
    pub requested_amount: Decimal,
    pub payment_method: PaymentMethod,
}

impl NewInvestment {
    /// Validates the new investment data.
    pub fn validate(&self) -> Result<()> {
        if self.investor_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "investorId".to_string(),
            )));
        }
        if self.campaign_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "campaignId".to_string(),
            )));
        }
        if self.requested_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Requested amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Whole shares bought plus the exact amount they cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareOrder {
    pub shares: i64,
    pub amount: Decimal,
}

/// Computes the share order for a requested amount.
///
/// Fractional shares are never sold: rounding is always down so the
/// investor is never charged more than the floor-priced shares. Fails with
/// `InsufficientAmount` when the request buys less than one share.
pub fn compute_shares(requested_amount: Decimal, share_price: Decimal) -> Result<ShareOrder> {
    if share_price <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Share price must be positive, got {}",
            share_price
        ))));
    }
    let shares = (requested_amount / share_price)
        .floor()
        .to_i64()
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Share count for amount {} overflows",
                requested_amount
            )))
        })?;
    if shares <= 0 {
        return Err(Error::InsufficientAmount {
            requested: requested_amount,
            share_price,
        });
    }
    Ok(ShareOrder {
        shares,
        amount: Decimal::from(shares) * share_price,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_compute_shares_exact_multiple() {
        let order = compute_shares(dec!(100), dec!(10)).unwrap();
        assert_eq!(order.shares, 10);
        assert_eq!(order.amount, dec!(100));
    }

    #[test]
    fn test_compute_shares_rounds_down_never_up() {
        // 105 / 10 buys 10 shares for 100 - never 105, never 110.
        let order = compute_shares(dec!(105), dec!(10)).unwrap();
        assert_eq!(order.shares, 10);
        assert_eq!(order.amount, dec!(100));

        let order = compute_shares(dec!(109.99), dec!(10)).unwrap();
        assert_eq!(order.shares, 10);
        assert_eq!(order.amount, dec!(100));
    }

    #[test]
    fn test_compute_shares_fractional_share_price() {
        let order = compute_shares(dec!(10), dec!(2.5)).unwrap();
        assert_eq!(order.shares, 4);
        assert_eq!(order.amount, dec!(10));

        let order = compute_shares(dec!(11), dec!(2.5)).unwrap();
        assert_eq!(order.shares, 4);
        assert_eq!(order.amount, dec!(10));
    }

    #[test]
    fn test_compute_shares_below_one_share_fails() {
        let err = compute_shares(dec!(9.99), dec!(10)).unwrap_err();
        assert!(matches!(err, Error::InsufficientAmount { .. }));
    }

    #[test]
    fn test_compute_shares_rejects_bad_share_price() {
        assert!(compute_shares(dec!(100), Decimal::ZERO).is_err());
        assert!(compute_shares(dec!(100), dec!(-1)).is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(InvestmentStatus::Pending.counts_toward_ledger());
        assert!(InvestmentStatus::CoolingOff.counts_toward_ledger());
        assert!(InvestmentStatus::PaymentInitiated.counts_toward_ledger());
        assert!(InvestmentStatus::Completed.counts_toward_ledger());
        assert!(!InvestmentStatus::Cancelled.counts_toward_ledger());
        assert!(!InvestmentStatus::Refunded.counts_toward_ledger());

        assert!(InvestmentStatus::Pending.is_cancellable());
        assert!(InvestmentStatus::CoolingOff.is_cancellable());
        assert!(!InvestmentStatus::PaymentInitiated.is_cancellable());
        assert!(!InvestmentStatus::Completed.is_cancellable());

        assert!(InvestmentStatus::PaymentInitiated.is_completable());
        assert!(!InvestmentStatus::Cancelled.is_completable());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!(
            "BANK_TRANSFER".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert!("CASH_UNDER_MATTRESS".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_new_investment_validation() {
        let new_investment = NewInvestment {
            investor_id: "investor1".to_string(),
            campaign_id: "camp1".to_string(),
            requested_amount: dec!(100),
            payment_method: PaymentMethod::Card,
        };
        assert!(new_investment.validate().is_ok());

        let mut bad = new_investment.clone();
        bad.requested_amount = Decimal::ZERO;
        assert!(bad.validate().is_err());

        let mut bad = new_investment;
        bad.campaign_id = "  ".to_string();
        assert!(bad.validate().is_err());
    }
}
