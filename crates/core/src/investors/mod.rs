//! Investors module - the minimal investor surface the funding core needs.

mod investors_model;
mod investors_traits;

pub use investors_model::{Investor, KycStatus};
pub use investors_traits::InvestorRepositoryTrait;
