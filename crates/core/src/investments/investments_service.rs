use std::sync::Arc;

use chrono::Duration;
use log::debug;
use uuid::Uuid;

use super::investments_model::{compute_shares, Investment, InvestmentStatus, NewInvestment};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::campaigns::{CampaignRepositoryTrait, CampaignStatus};
use crate::constants::COOLING_OFF_HOURS;
use crate::db::DbTransactionExecutor;
use crate::eligibility::EligibilityValidatorTrait;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::investors::InvestorRepositoryTrait;
use crate::ledger::{LedgerDelta, LedgerEntry, LedgerEntryRepositoryTrait, LedgerEntryType};
use crate::utils::clock::Clock;

/// The investment lifecycle manager (generic over the transaction executor).
///
/// Creates, cancels and completes investments, computes share quantities and
/// drives the ledger update primitive. Runs inline within an investor's
/// request; conflicts with concurrent writers surface as
/// `Error::ConcurrentUpdate` and are never retried here - retry policy
/// belongs to the caller.
pub struct InvestmentService<E: DbTransactionExecutor> {
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerEntryRepositoryTrait>,
    investor_repository: Arc<dyn InvestorRepositoryTrait>,
    eligibility_validator: Arc<dyn EligibilityValidatorTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    clock: Arc<dyn Clock>,
    transaction_executor: E,
}

impl<E: DbTransactionExecutor> InvestmentService<E> {
    /// Creates a new InvestmentService instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerEntryRepositoryTrait>,
        investor_repository: Arc<dyn InvestorRepositoryTrait>,
        eligibility_validator: Arc<dyn EligibilityValidatorTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        clock: Arc<dyn Clock>,
        transaction_executor: E,
    ) -> Self {
        Self {
            investment_repository,
            campaign_repository,
            ledger_repository,
            investor_repository,
            eligibility_validator,
            event_sink,
            clock,
            transaction_executor,
        }
    }
}

#[async_trait::async_trait]
impl<E: DbTransactionExecutor> InvestmentServiceTrait for InvestmentService<E> {
    async fn create_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
        new_investment.validate()?;

        let investor = self
            .investor_repository
            .get_by_id(&new_investment.investor_id)?;
        if investor.is_deleted {
            return Err(Error::Forbidden(format!(
                "Investor '{}' account is deactivated",
                investor.id
            )));
        }

        let campaign = self
            .campaign_repository
            .get_by_id(&new_investment.campaign_id)?;
        if campaign.status != CampaignStatus::Live {
            return Err(Error::InvalidStatus(format!(
                "Campaign '{}' is {} and does not accept investments",
                campaign.id, campaign.status
            )));
        }

        let already_invested = self
            .investment_repository
            .total_active_amount(&investor.id, &campaign.id)?;
        self.eligibility_validator.validate(
            &investor,
            &campaign,
            new_investment.requested_amount,
            already_invested,
        )?;

        let order = compute_shares(new_investment.requested_amount, campaign.share_price)?;
        if let Some(remaining) = campaign.remaining_shares() {
            if order.shares > remaining {
                return Err(Error::SharePoolExhausted {
                    requested: order.shares,
                    remaining,
                });
            }
        }

        let now = self.clock.now();
        let investment = Investment {
            id: Uuid::new_v4().to_string(),
            investor_id: investor.id.clone(),
            campaign_id: campaign.id.clone(),
            amount: order.amount,
            shares: order.shares,
            share_price: campaign.share_price,
            status: InvestmentStatus::Pending,
            payment_method: new_investment.payment_method,
            cooling_off_expires_at: now + Duration::hours(COOLING_OFF_HOURS),
            cancelled_at: None,
            completed_at: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };
        let entry = LedgerEntry::new(
            investment.id.clone(),
            campaign.id.clone(),
            LedgerEntryType::Investment,
            order.amount,
            now,
        );
        let delta = LedgerDelta::new(order.amount, order.shares);
        let expected_version = campaign.version;

        debug!(
            "Creating investment: investor {}, campaign {}, {} shares for {}",
            investor.id, campaign.id, order.shares, order.amount
        );

        // Clones for the transaction closure
        let investment_repository = self.investment_repository.clone();
        let ledger_repository = self.ledger_repository.clone();
        let campaign_repository = self.campaign_repository.clone();
        let campaign_id = campaign.id.clone();

        let created = self.transaction_executor.execute(move |conn| {
            let created = investment_repository.create_in_transaction(investment, conn)?;
            ledger_repository.record_in_transaction(entry, conn)?;
            let rows = campaign_repository.apply_ledger_delta_in_transaction(
                &campaign_id,
                &delta,
                expected_version,
                conn,
            )?;
            if rows == 0 {
                return Err(Error::ConcurrentUpdate(campaign_id));
            }
            Ok(created)
        })?;

        self.event_sink.emit(DomainEvent::investment_created(
            created.id.clone(),
            created.investor_id.clone(),
            created.campaign_id.clone(),
            created.amount,
        ));

        Ok(created)
    }

    async fn cancel_investment(
        &self,
        investment_id: &str,
        requesting_user_id: &str,
        reason: Option<String>,
    ) -> Result<Investment> {
        let investment = self.investment_repository.get_by_id(investment_id)?;

        if investment.investor_id != requesting_user_id {
            return Err(Error::Forbidden(format!(
                "User '{}' does not own investment '{}'",
                requesting_user_id, investment_id
            )));
        }
        if !investment.status.is_cancellable() {
            return Err(Error::InvalidStatus(format!(
                "Investment '{}' is {} and cannot be cancelled",
                investment_id, investment.status
            )));
        }
        let now = self.clock.now();
        if now > investment.cooling_off_expires_at {
            return Err(Error::CoolingOffExpired(investment_id.to_string()));
        }

        let mut cancelled = investment.clone();
        cancelled.status = InvestmentStatus::Cancelled;
        cancelled.cancelled_at = Some(now);
        cancelled.cancellation_reason =
            Some(reason.unwrap_or_else(|| "Cancelled by investor".to_string()));
        cancelled.updated_at = now;

        // Reverse the exact delta applied at creation; the campaign version
        // is re-read inside the transaction, not taken from creation time.
        let delta = LedgerDelta::new(investment.amount, investment.shares).negated();
        let entry = LedgerEntry::new(
            investment.id.clone(),
            investment.campaign_id.clone(),
            LedgerEntryType::Refund,
            investment.amount,
            now,
        );

        debug!(
            "Cancelling investment {}: reversing {} / {} shares on campaign {}",
            investment_id, investment.amount, investment.shares, investment.campaign_id
        );

        let investment_repository = self.investment_repository.clone();
        let ledger_repository = self.ledger_repository.clone();
        let campaign_repository = self.campaign_repository.clone();
        let campaign_id = investment.campaign_id.clone();

        self.transaction_executor.execute(move |conn| {
            let campaign = campaign_repository.get_by_id_in_transaction(&campaign_id, conn)?;
            investment_repository.update_in_transaction(&cancelled, conn)?;
            ledger_repository.record_in_transaction(entry, conn)?;
            let rows = campaign_repository.apply_ledger_delta_in_transaction(
                &campaign_id,
                &delta,
                campaign.version,
                conn,
            )?;
            if rows == 0 {
                return Err(Error::ConcurrentUpdate(campaign_id));
            }
            Ok(cancelled)
        })
    }

    async fn complete_investment(&self, investment_id: &str) -> Result<Investment> {
        let mut investment = self.investment_repository.get_by_id(investment_id)?;
        if !investment.status.is_completable() {
            return Err(Error::InvalidStatus(format!(
                "Investment '{}' is {} and cannot be completed",
                investment_id, investment.status
            )));
        }
        let now = self.clock.now();
        investment.status = InvestmentStatus::Completed;
        investment.completed_at = Some(now);
        investment.updated_at = now;
        self.investment_repository.update(&investment).await?;
        Ok(investment)
    }

    async fn initiate_payment(&self, investment_id: &str) -> Result<Investment> {
        let mut investment = self.investment_repository.get_by_id(investment_id)?;
        if !matches!(
            investment.status,
            InvestmentStatus::Pending | InvestmentStatus::CoolingOff
        ) {
            return Err(Error::InvalidStatus(format!(
                "Investment '{}' is {} and cannot enter payment",
                investment_id, investment.status
            )));
        }
        investment.status = InvestmentStatus::PaymentInitiated;
        investment.updated_at = self.clock.now();
        self.investment_repository.update(&investment).await?;
        Ok(investment)
    }

    async fn mark_refunded(&self, investment_id: &str) -> Result<Investment> {
        let mut investment = self.investment_repository.get_by_id(investment_id)?;
        if investment.status != InvestmentStatus::Cancelled {
            return Err(Error::InvalidStatus(format!(
                "Investment '{}' is {} and cannot be marked refunded",
                investment_id, investment.status
            )));
        }
        investment.status = InvestmentStatus::Refunded;
        investment.updated_at = self.clock.now();
        self.investment_repository.update(&investment).await?;
        Ok(investment)
    }

    fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        self.investment_repository.get_by_id(investment_id)
    }

    fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<Investment>> {
        self.investment_repository.list_by_campaign(campaign_id)
    }
}
