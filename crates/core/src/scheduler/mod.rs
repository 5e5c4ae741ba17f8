//! Scheduler module - periodic campaign lifecycle promotion.

mod scheduler_service;

pub use scheduler_service::{CampaignScheduler, TickSummary};
