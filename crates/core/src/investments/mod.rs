//! Investments module - the investment lifecycle manager.

mod investments_model;
mod investments_service;
mod investments_traits;


// Re-export the public interface
pub use investments_model::{
    compute_shares, Investment, InvestmentStatus, NewInvestment, PaymentMethod, ShareOrder,
};
pub use investments_service::InvestmentService;
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
