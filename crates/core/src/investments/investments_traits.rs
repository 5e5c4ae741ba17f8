//! Investment repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::investments_model::{Investment, NewInvestment};
use crate::errors::Result;

/// Trait defining the contract for Investment repository operations.
///
/// Investments are append-mostly: created once, status-mutated by the
/// lifecycle manager, never deleted.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Retrieves an investment by its ID.
    fn get_by_id(&self, investment_id: &str) -> Result<Investment>;

    /// Lists investments for a campaign, oldest first.
    fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<Investment>>;

    /// Sums the amounts of this investor's investments in a campaign whose
    /// status still counts toward the ledger. Feeds the eligibility check.
    fn total_active_amount(&self, investor_id: &str, campaign_id: &str) -> Result<Decimal>;

    /// Inserts a fully-built investment row inside an open transaction.
    fn create_in_transaction(
        &self,
        investment: Investment,
        conn: &mut SqliteConnection,
    ) -> Result<Investment>;

    /// Persists a status mutation inside an open transaction (used by
    /// cancellation, which must commit together with the ledger reversal).
    fn update_in_transaction(
        &self,
        investment: &Investment,
        conn: &mut SqliteConnection,
    ) -> Result<()>;

    /// Persists a status mutation that involves no ledger change
    /// (completion, payment initiation, refund marking).
    async fn update(&self, investment: &Investment) -> Result<()>;
}

/// Trait defining the contract for the investment lifecycle manager.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    /// Creates an investment against a LIVE campaign and applies the
    /// positive ledger delta. Fails with `ConcurrentUpdate` when the
    /// campaign version moved between read and write; the caller decides
    /// whether to re-fetch and retry.
    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment>;

    /// Cancels an investment within its cooling-off window and reverses the
    /// ledger delta exactly.
    async fn cancel_investment(
        &self,
        investment_id: &str,
        requesting_user_id: &str,
        reason: Option<String>,
    ) -> Result<Investment>;

    /// Marks an investment COMPLETED once the payment collaborator confirms
    /// funds cleared. Performs no payment I/O itself.
    async fn complete_investment(&self, investment_id: &str) -> Result<Investment>;

    /// Marks an investment PAYMENT_INITIATED when a payment session opens.
    async fn initiate_payment(&self, investment_id: &str) -> Result<Investment>;

    /// Marks a CANCELLED investment REFUNDED once the refund settles.
    /// The ledger was already reversed at cancellation.
    async fn mark_refunded(&self, investment_id: &str) -> Result<Investment>;

    /// Retrieves an investment by ID.
    fn get_investment(&self, investment_id: &str) -> Result<Investment>;

    /// Lists a campaign's investments.
    fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<Investment>>;
}
