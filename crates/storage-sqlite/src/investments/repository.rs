use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crowdfund_core::errors::Result;
use crowdfund_core::investments::{Investment, InvestmentRepositoryTrait};

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::investments;
use crate::schema::investments::dsl::*;
use crate::utils::format_datetime;

use super::model::InvestmentDb;

/// Repository for managing investment data in the database.
pub struct InvestmentRepository {
    pool: Arc<DbPool>,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_by_id(&self, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)?;
        let row = investments
            .select(InvestmentDb::as_select())
            .find(investment_id)
            .first::<InvestmentDb>(&mut conn)
            .map_err(IntoCore::into_core)?;
        Investment::try_from(row)
    }

    fn list_by_campaign(&self, campaign: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments
            .select(InvestmentDb::as_select())
            .filter(campaign_id.eq(campaign))
            .order(created_at.asc())
            .load::<InvestmentDb>(&mut conn)
            .map_err(IntoCore::into_core)?;

        rows.into_iter().map(Investment::try_from).collect()
    }

    fn total_active_amount(&self, investor: &str, campaign: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments
            .select(InvestmentDb::as_select())
            .filter(investor_id.eq(investor))
            .filter(campaign_id.eq(campaign))
            .load::<InvestmentDb>(&mut conn)
            .map_err(IntoCore::into_core)?;

        // Summed over parsed decimals, not SQL, so TEXT storage never loses
        // precision to float coercion.
        let mut total = Decimal::ZERO;
        for row in rows {
            let investment = Investment::try_from(row)?;
            if investment.status.counts_toward_ledger() {
                total += investment.amount;
            }
        }
        Ok(total)
    }

    fn create_in_transaction(
        &self,
        investment: Investment,
        conn: &mut SqliteConnection,
    ) -> Result<Investment> {
        let row = InvestmentDb::from(&investment);
        diesel::insert_into(investments::table)
            .values(&row)
            .execute(conn)
            .map_err(IntoCore::into_core)?;
        Ok(investment)
    }

    fn update_in_transaction(
        &self,
        investment: &Investment,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        let mut row = InvestmentDb::from(investment);
        row.updated_at = format_datetime(&chrono::Utc::now());

        let affected = diesel::update(investments.find(&row.id))
            .set(&row)
            .execute(conn)
            .map_err(IntoCore::into_core)?;
        if affected == 0 {
            return Err(diesel::result::Error::NotFound.into_core());
        }
        Ok(())
    }

    async fn update(&self, investment: &Investment) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        self.update_in_transaction(investment, &mut conn)
    }
}
