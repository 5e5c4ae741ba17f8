//! Eligibility module - the gate consulted before an investment is created.

mod eligibility_traits;
mod kyc_validator;

pub use eligibility_traits::EligibilityValidatorTrait;
pub use kyc_validator::KycEligibilityValidator;
