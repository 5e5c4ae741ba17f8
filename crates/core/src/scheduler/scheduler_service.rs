//! Periodic campaign promotion.
//!
//! Two independent scans per tick: auto-close LIVE campaigns whose end date
//! has passed, and auto-fund LIVE campaigns whose raised amount has met the
//! target. Each campaign is processed in isolation - a failure on one is
//! logged and skipped, and the campaign stays eligible for the next tick.
//!
//! The scheduler only flips `status`/`funded_at` through the campaign
//! service; it never touches `raised_amount`, `sold_shares` or `version`,
//! so it cannot race with the ledger update primitive. Deployments must run
//! at most one scheduler instance (single-runner discipline); that is an
//! operational concern, not logic implemented here.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::campaigns::{CampaignRepositoryTrait, CampaignServiceTrait, CampaignStatus};
use crate::constants::SCHEDULER_ACTOR_ID;
use crate::errors::Result;
use crate::utils::clock::Clock;

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Campaigns transitioned LIVE -> CLOSED.
    pub closed: usize,
    /// Campaigns transitioned LIVE -> FUNDED.
    pub funded: usize,
    /// Campaigns whose transition failed and was skipped.
    pub failures: usize,
}

/// Periodic process promoting campaigns across the lifecycle state machine.
pub struct CampaignScheduler {
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    campaign_service: Arc<dyn CampaignServiceTrait>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl CampaignScheduler {
    pub fn new(
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
        campaign_service: Arc<dyn CampaignServiceTrait>,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            campaign_repository,
            campaign_service,
            clock,
            interval,
        }
    }

    /// Runs the scheduler loop until the task is dropped.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        info!(
            "Campaign scheduler started (interval: {}s)",
            self.interval.as_secs()
        );
        loop {
            ticker.tick().await;
            match self.run_tick().await {
                Ok(summary) => {
                    if summary.closed > 0 || summary.funded > 0 || summary.failures > 0 {
                        info!(
                            "Scheduler tick: {} closed, {} funded, {} failures",
                            summary.closed, summary.funded, summary.failures
                        );
                    }
                }
                Err(e) => error!("Scheduler tick failed: {}", e),
            }
        }
    }

    /// Executes one tick: the auto-close scan, then the auto-fund scan.
    ///
    /// Returns `Err` only when a scan query itself fails; per-campaign
    /// transition failures are counted in the summary and do not abort the
    /// tick.
    pub async fn run_tick(&self) -> Result<TickSummary> {
        let mut summary = TickSummary::default();
        self.close_expired(&mut summary).await?;
        self.fund_target_reached(&mut summary).await?;
        Ok(summary)
    }

    /// Closes LIVE campaigns whose end date has passed.
    ///
    /// The scan predicate excludes already-CLOSED campaigns, so re-running
    /// after a partial failure is idempotent.
    async fn close_expired(&self, summary: &mut TickSummary) -> Result<()> {
        let now = self.clock.now();
        let expired = self.campaign_repository.list_live_ended_before(now)?;
        debug!("Auto-close scan found {} expired campaign(s)", expired.len());

        for campaign in expired {
            match self
                .campaign_service
                .transition_campaign(&campaign.id, CampaignStatus::Closed, SCHEDULER_ACTOR_ID)
                .await
            {
                Ok(_) => summary.closed += 1,
                Err(e) => {
                    summary.failures += 1;
                    error!("Failed to auto-close campaign {}: {}", campaign.id, e);
                }
            }
        }
        Ok(())
    }

    /// Funds LIVE campaigns whose raised amount has met or exceeded the
    /// target.
    async fn fund_target_reached(&self, summary: &mut TickSummary) -> Result<()> {
        let live = self.campaign_repository.list_live()?;

        for campaign in live.into_iter().filter(|c| c.target_reached()) {
            match self
                .campaign_service
                .transition_campaign(&campaign.id, CampaignStatus::Funded, SCHEDULER_ACTOR_ID)
                .await
            {
                Ok(_) => summary.funded += 1,
                Err(e) => {
                    summary.failures += 1;
                    error!("Failed to auto-fund campaign {}: {}", campaign.id, e);
                }
            }
        }
        Ok(())
    }
}
