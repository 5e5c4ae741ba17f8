//! SQLite storage implementation for investors.

mod model;
mod repository;

pub use model::InvestorDb;
pub use repository::InvestorRepository;
