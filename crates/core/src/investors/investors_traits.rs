//! Investor repository trait.

use super::investors_model::Investor;
use crate::errors::Result;

/// Read-side contract for investors. Profile mutation is out of scope for
/// the funding core.
pub trait InvestorRepositoryTrait: Send + Sync {
    /// Retrieves an investor by ID. Soft-deleted investors are still
    /// returned; the service decides what they may do.
    fn get_by_id(&self, investor_id: &str) -> Result<Investor>;
}
