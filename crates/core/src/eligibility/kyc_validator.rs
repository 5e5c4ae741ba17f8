//! Default eligibility rules: approved KYC plus an optional per-campaign cap.

use rust_decimal::Decimal;

use super::eligibility_traits::EligibilityValidatorTrait;
use crate::campaigns::Campaign;
use crate::errors::{Error, Result};
use crate::investors::{Investor, KycStatus};

/// Validator requiring approved KYC, with an optional cap on the total an
/// investor may put into a single campaign.
#[derive(Debug, Clone, Default)]
pub struct KycEligibilityValidator {
    max_per_campaign: Option<Decimal>,
}

impl KycEligibilityValidator {
    pub fn new(max_per_campaign: Option<Decimal>) -> Self {
        Self { max_per_campaign }
    }
}

impl EligibilityValidatorTrait for KycEligibilityValidator {
    fn validate(
        &self,
        investor: &Investor,
        _campaign: &Campaign,
        amount: Decimal,
        already_invested: Decimal,
    ) -> Result<()> {
        if investor.kyc_status != KycStatus::Approved {
            return Err(Error::Rejected(format!(
                "Investor '{}' KYC status is {}",
                investor.id, investor.kyc_status
            )));
        }
        if let Some(cap) = self.max_per_campaign {
            if already_invested + amount > cap {
                return Err(Error::Rejected(format!(
                    "Investment of {} would exceed the per-campaign limit of {} \
                     (already invested: {})",
                    amount, cap, already_invested
                )));
            }
        }
        Ok(())
    }
}
