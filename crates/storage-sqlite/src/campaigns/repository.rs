use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crowdfund_core::campaigns::{Campaign, CampaignRepositoryTrait, CampaignStatus, NewCampaign};
use crowdfund_core::errors::Result;
use crowdfund_core::ledger::{self, LedgerDelta};

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::campaigns;
use crate::schema::campaigns::dsl::*;
use crate::utils::{format_datetime, format_decimal};

use super::model::CampaignDb;

/// Repository for managing campaign data in the database.
pub struct CampaignRepository {
    pool: Arc<DbPool>,
}

impl CampaignRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn load(&self, campaign_id: &str, conn: &mut SqliteConnection) -> Result<Campaign> {
        let row = campaigns
            .select(CampaignDb::as_select())
            .find(campaign_id)
            .first::<CampaignDb>(conn)
            .map_err(IntoCore::into_core)?;
        Campaign::try_from(row)
    }
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        new_campaign.validate()?;

        let now = Utc::now();
        let campaign = Campaign {
            id: new_campaign
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            issuer_id: new_campaign.issuer_id,
            name: new_campaign.name,
            status: CampaignStatus::Draft,
            target_amount: new_campaign.target_amount,
            raised_amount: rust_decimal::Decimal::ZERO,
            share_price: new_campaign.share_price,
            total_shares: new_campaign.total_shares,
            sold_shares: 0,
            version: 0,
            start_date: new_campaign.start_date,
            end_date: new_campaign.end_date,
            funded_at: None,
            created_at: now,
            updated_at: now,
        };

        let row = CampaignDb::from(&campaign);
        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(campaigns::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(IntoCore::into_core)?;

        Ok(campaign)
    }

    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign> {
        let mut conn = get_connection(&self.pool)?;
        self.load(campaign_id, &mut conn)
    }

    fn get_by_id_in_transaction(
        &self,
        campaign_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Campaign> {
        self.load(campaign_id, conn)
    }

    fn list_live(&self) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = campaigns
            .select(CampaignDb::as_select())
            .filter(status.eq(CampaignStatus::Live.as_str()))
            .order(created_at.asc())
            .load::<CampaignDb>(&mut conn)
            .map_err(IntoCore::into_core)?;

        rows.into_iter().map(Campaign::try_from).collect()
    }

    fn list_live_ended_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Campaign>> {
        // Timestamps are RFC 3339 text with varying offsets, so the cutoff
        // comparison happens after parsing rather than in SQL.
        let live = self.list_live()?;
        Ok(live
            .into_iter()
            .filter(|campaign| campaign.ended_before(cutoff))
            .collect())
    }

    async fn update_status(
        &self,
        campaign_id: &str,
        new_status: CampaignStatus,
        funded: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let now = format_datetime(&Utc::now());

        let affected = match funded {
            Some(instant) => diesel::update(campaigns.find(campaign_id))
                .set((
                    status.eq(new_status.as_str()),
                    funded_at.eq(Some(format_datetime(&instant))),
                    updated_at.eq(&now),
                ))
                .execute(&mut conn)
                .map_err(IntoCore::into_core)?,
            None => diesel::update(campaigns.find(campaign_id))
                .set((status.eq(new_status.as_str()), updated_at.eq(&now)))
                .execute(&mut conn)
                .map_err(IntoCore::into_core)?,
        };

        if affected == 0 {
            return Err(diesel::result::Error::NotFound.into_core());
        }
        Ok(())
    }

    fn apply_ledger_delta_in_transaction(
        &self,
        campaign_id: &str,
        delta: &LedgerDelta,
        expected_version: i64,
        conn: &mut SqliteConnection,
    ) -> Result<usize> {
        let current = self.load(campaign_id, conn)?;

        // The pure primitive computes the new counters; the guarded UPDATE
        // below makes the version check effective against writers that
        // committed after `current` was read.
        let updated = match ledger::apply_delta(&current, delta, expected_version) {
            Some(updated) => updated,
            None => return Ok(0),
        };

        let affected = diesel::update(
            campaigns
                .find(campaign_id)
                .filter(version.eq(expected_version)),
        )
        .set((
            raised_amount.eq(format_decimal(&updated.raised_amount)),
            sold_shares.eq(updated.sold_shares),
            version.eq(updated.version),
            updated_at.eq(format_datetime(&Utc::now())),
        ))
        .execute(conn)
        .map_err(IntoCore::into_core)?;

        Ok(affected)
    }
}
