use std::sync::Arc;

use diesel::prelude::*;

use crowdfund_core::errors::Result;
use crowdfund_core::investors::{Investor, InvestorRepositoryTrait};

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::investors;
use crate::schema::investors::dsl::*;

use super::model::InvestorDb;

/// Repository for reading investor records.
pub struct InvestorRepository {
    pool: Arc<DbPool>,
}

impl InvestorRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Inserts an investor. The funding core never creates investors; this
    /// exists for provisioning and integration test setup.
    pub fn insert(&self, investor: &Investor) -> Result<Investor> {
        let row = InvestorDb::from(investor);
        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(investors::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(IntoCore::into_core)?;
        Ok(investor.clone())
    }
}

impl InvestorRepositoryTrait for InvestorRepository {
    fn get_by_id(&self, investor_id: &str) -> Result<Investor> {
        let mut conn = get_connection(&self.pool)?;
        let row = investors
            .select(InvestorDb::as_select())
            .find(investor_id)
            .first::<InvestorDb>(&mut conn)
            .map_err(IntoCore::into_core)?;
        Investor::try_from(row)
    }
}
