//! Eligibility validator trait.

use rust_decimal::Decimal;

use crate::campaigns::Campaign;
use crate::errors::Result;
use crate::investors::Investor;

/// Gate consulted by the investment lifecycle before any row is written.
///
/// Implementations encapsulate KYC, suitability and investment-limit rules;
/// the investment service only cares about pass/fail. A failure surfaces as
/// `Error::Rejected` and aborts the create flow.
pub trait EligibilityValidatorTrait: Send + Sync {
    fn validate(
        &self,
        investor: &Investor,
        campaign: &Campaign,
        amount: Decimal,
        already_invested: Decimal,
    ) -> Result<()>;
}
