//! Campaign repository and service traits.
//!
//! These traits define the contract for campaign operations without any
//! database-specific types, except the in-transaction variants used by the
//! investment lifecycle (which share a connection with the investment and
//! ledger-entry writes so the whole flow commits or rolls back as one).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::sqlite::SqliteConnection;

use super::campaigns_model::{Campaign, CampaignStatus, NewCampaign};
use crate::errors::Result;
use crate::ledger::LedgerDelta;

/// Trait defining the contract for Campaign repository operations.
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    /// Creates a new campaign in DRAFT.
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign>;

    /// Retrieves a campaign by its ID.
    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign>;

    /// Retrieves a campaign by its ID inside an open transaction.
    ///
    /// Used by cancellation to read the campaign's *current* version, not
    /// the one captured when the investment was created.
    fn get_by_id_in_transaction(
        &self,
        campaign_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Campaign>;

    /// Lists all LIVE campaigns.
    fn list_live(&self) -> Result<Vec<Campaign>>;

    /// Lists LIVE campaigns whose end date lies strictly before `cutoff`.
    fn list_live_ended_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Campaign>>;

    /// Persists a status change (and, when entering FUNDED, `funded_at`).
    ///
    /// Deliberately does not touch `raised_amount`, `sold_shares` or
    /// `version`, so it cannot race with the ledger update primitive.
    async fn update_status(
        &self,
        campaign_id: &str,
        status: CampaignStatus,
        funded_at: Option<DateTime<Utc>>,
    ) -> Result<()>;

    /// The ledger update primitive: a conditional write of
    /// `raised_amount += delta.amount, sold_shares += delta.shares,
    /// version = expected_version + 1` guarded by
    /// `version == expected_version`.
    ///
    /// Returns the number of rows affected: 1 on success, 0 if another
    /// writer already advanced the version. Knows nothing about investments
    /// or business rules.
    fn apply_ledger_delta_in_transaction(
        &self,
        campaign_id: &str,
        delta: &LedgerDelta,
        expected_version: i64,
        conn: &mut SqliteConnection,
    ) -> Result<usize>;
}

/// Trait defining the contract for Campaign service operations.
#[async_trait]
pub trait CampaignServiceTrait: Send + Sync {
    /// Creates a new campaign in DRAFT for an issuer.
    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign>;

    /// Retrieves a campaign by ID.
    fn get_campaign(&self, campaign_id: &str) -> Result<Campaign>;

    /// Drives a campaign through the lifecycle state machine, persists the
    /// result and emits `CampaignStatusChanged`. The single chokepoint for
    /// all status changes.
    async fn transition_campaign(
        &self,
        campaign_id: &str,
        new_status: CampaignStatus,
        actor_id: &str,
    ) -> Result<Campaign>;
}
