//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::campaigns::CampaignStatus;

/// Domain events emitted by core services after successful mutations.
///
/// These events are facts about state changes. Downstream consumers
/// (notifications, analytics) subscribe through a sink; the emitting
/// services have no knowledge of subscribers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A campaign passed through the lifecycle state machine.
    CampaignStatusChanged {
        campaign_id: String,
        old_status: CampaignStatus,
        new_status: CampaignStatus,
        actor_id: String,
    },

    /// An investment was created and the campaign ledger updated.
    InvestmentCreated {
        investment_id: String,
        investor_id: String,
        campaign_id: String,
        amount: Decimal,
    },
}

impl DomainEvent {
    /// Creates a CampaignStatusChanged event.
    pub fn campaign_status_changed(
        campaign_id: String,
        old_status: CampaignStatus,
        new_status: CampaignStatus,
        actor_id: String,
    ) -> Self {
        Self::CampaignStatusChanged {
            campaign_id,
            old_status,
            new_status,
            actor_id,
        }
    }

    /// Creates an InvestmentCreated event.
    pub fn investment_created(
        investment_id: String,
        investor_id: String,
        campaign_id: String,
        amount: Decimal,
    ) -> Self {
        Self::InvestmentCreated {
            investment_id,
            investor_id,
            campaign_id,
            amount,
        }
    }
}
