//! Campaigns module - domain models, lifecycle state machine, service, traits.

mod campaigns_model;
mod campaigns_service;
mod campaigns_traits;
mod state_machine;

// Re-export the public interface
pub use campaigns_model::{Campaign, CampaignStatus, NewCampaign};
pub use campaigns_service::CampaignService;
pub use campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
pub use state_machine::{allowed_transitions, apply_transition, can_transition};
