use std::sync::Arc;

use log::debug;

use super::campaigns_model::{Campaign, CampaignStatus, NewCampaign};
use super::campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
use super::state_machine::apply_transition;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::utils::clock::Clock;

/// Service owning campaign lifecycle transitions.
///
/// Both call sites that change a campaign's status - manual admin action and
/// the scheduler - go through [`CampaignServiceTrait::transition_campaign`],
/// so the transition table is enforced in exactly one place.
pub struct CampaignService {
    repository: Arc<dyn CampaignRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    clock: Arc<dyn Clock>,
}

impl CampaignService {
    /// Creates a new CampaignService instance.
    pub fn new(
        repository: Arc<dyn CampaignRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            event_sink,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl CampaignServiceTrait for CampaignService {
    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        new_campaign.validate()?;
        self.repository.create(new_campaign).await
    }

    fn get_campaign(&self, campaign_id: &str) -> Result<Campaign> {
        self.repository.get_by_id(campaign_id)
    }

    async fn transition_campaign(
        &self,
        campaign_id: &str,
        new_status: CampaignStatus,
        actor_id: &str,
    ) -> Result<Campaign> {
        let mut campaign = self.repository.get_by_id(campaign_id)?;
        let old_status = apply_transition(&mut campaign, new_status)?;

        // Manual and scheduler-driven funding share this path, so the
        // timestamp is stamped here rather than at either call site.
        if new_status == CampaignStatus::Funded && campaign.funded_at.is_none() {
            campaign.funded_at = Some(self.clock.now());
        }

        debug!(
            "Transitioning campaign {}: {} -> {} (actor: {})",
            campaign_id, old_status, new_status, actor_id
        );

        self.repository
            .update_status(&campaign.id, campaign.status, campaign.funded_at)
            .await?;

        self.event_sink.emit(DomainEvent::campaign_status_changed(
            campaign.id.clone(),
            old_status,
            new_status,
            actor_id.to_string(),
        ));

        Ok(campaign)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::RwLock;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use diesel::sqlite::SqliteConnection;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::errors::{DatabaseError, Error};
    use crate::events::MockDomainEventSink;
    use crate::ledger::LedgerDelta;
    use crate::utils::clock::FixedClock;

    struct MockCampaignRepository {
        campaigns: RwLock<Vec<Campaign>>,
    }

    impl MockCampaignRepository {
        fn new(campaigns: Vec<Campaign>) -> Self {
            Self {
                campaigns: RwLock::new(campaigns),
            }
        }

        fn get(&self, campaign_id: &str) -> Campaign {
            self.campaigns
                .read()
                .unwrap()
                .iter()
                .find(|c| c.id == campaign_id)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl CampaignRepositoryTrait for MockCampaignRepository {
        async fn create(&self, _: NewCampaign) -> Result<Campaign> {
            unimplemented!()
        }

        fn get_by_id(&self, campaign_id: &str) -> Result<Campaign> {
            self.campaigns
                .read()
                .unwrap()
                .iter()
                .find(|c| c.id == campaign_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(campaign_id.to_string()))
                })
        }

        fn get_by_id_in_transaction(
            &self,
            campaign_id: &str,
            _conn: &mut SqliteConnection,
        ) -> Result<Campaign> {
            self.get_by_id(campaign_id)
        }

        fn list_live(&self) -> Result<Vec<Campaign>> {
            unimplemented!()
        }

        fn list_live_ended_before(&self, _: DateTime<Utc>) -> Result<Vec<Campaign>> {
            unimplemented!()
        }

        async fn update_status(
            &self,
            campaign_id: &str,
            status: CampaignStatus,
            funded_at: Option<DateTime<Utc>>,
        ) -> Result<()> {
            let mut campaigns = self.campaigns.write().unwrap();
            let campaign = campaigns
                .iter_mut()
                .find(|c| c.id == campaign_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(campaign_id.to_string()))
                })?;
            campaign.status = status;
            campaign.funded_at = funded_at;
            Ok(())
        }

        fn apply_ledger_delta_in_transaction(
            &self,
            _: &str,
            _: &LedgerDelta,
            _: i64,
            _: &mut SqliteConnection,
        ) -> Result<usize> {
            unimplemented!()
        }
    }

    fn live_campaign(id: &str) -> Campaign {
        Campaign {
            id: id.to_string(),
            issuer_id: "issuer1".to_string(),
            name: "Test".to_string(),
            status: CampaignStatus::Live,
            target_amount: dec!(1000),
            raised_amount: dec!(1000),
            share_price: dec!(10),
            total_shares: None,
            sold_shares: 100,
            version: 3,
            start_date: Some(Utc::now()),
            end_date: Some(Utc::now() + Duration::days(10)),
            funded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_transition_persists_and_emits_event() {
        let repository = Arc::new(MockCampaignRepository::new(vec![live_campaign("c1")]));
        let sink = Arc::new(MockDomainEventSink::new());
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let service = CampaignService::new(repository.clone(), sink.clone(), clock);

        let campaign = service
            .transition_campaign("c1", CampaignStatus::Closed, "admin1")
            .await
            .unwrap();

        assert_eq!(campaign.status, CampaignStatus::Closed);
        assert_eq!(repository.get("c1").status, CampaignStatus::Closed);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::CampaignStatusChanged {
                campaign_id,
                old_status,
                new_status,
                actor_id,
            } => {
                assert_eq!(campaign_id, "c1");
                assert_eq!(*old_status, CampaignStatus::Live);
                assert_eq!(*new_status, CampaignStatus::Closed);
                assert_eq!(actor_id, "admin1");
            }
            other => panic!("Unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transition_to_funded_stamps_funded_at() {
        let now = Utc::now();
        let repository = Arc::new(MockCampaignRepository::new(vec![live_campaign("c1")]));
        let clock = Arc::new(FixedClock::new(now));
        let service = CampaignService::new(
            repository.clone(),
            Arc::new(MockDomainEventSink::new()),
            clock,
        );

        let campaign = service
            .transition_campaign("c1", CampaignStatus::Funded, "admin1")
            .await
            .unwrap();

        assert_eq!(campaign.funded_at, Some(now));
        assert_eq!(repository.get("c1").funded_at, Some(now));
    }

    #[tokio::test]
    async fn test_illegal_transition_leaves_campaign_untouched() {
        let mut campaign = live_campaign("c1");
        campaign.status = CampaignStatus::Funded;
        let repository = Arc::new(MockCampaignRepository::new(vec![campaign]));
        let sink = Arc::new(MockDomainEventSink::new());
        let service = CampaignService::new(
            repository.clone(),
            sink.clone(),
            Arc::new(FixedClock::new(Utc::now())),
        );

        let err = service
            .transition_campaign("c1", CampaignStatus::Live, "admin1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(repository.get("c1").status, CampaignStatus::Funded);
        assert!(sink.is_empty());
    }
}
