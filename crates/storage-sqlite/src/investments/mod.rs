//! SQLite storage implementation for investments.

mod model;
mod repository;

pub use model::InvestmentDb;
pub use repository::InvestmentRepository;
