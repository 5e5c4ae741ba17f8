//! SQLite storage implementation for campaigns.

mod model;
mod repository;

pub use model::CampaignDb;
pub use repository::CampaignRepository;
