//! Campaign lifecycle state machine.
//!
//! The transition table below is the sole source of truth for which status
//! changes are legal. Every transition, manual or scheduler-driven, passes
//! through [`apply_transition`]; nothing else writes `Campaign::status`.

use super::campaigns_model::{Campaign, CampaignStatus};
use crate::errors::{Error, Result, ValidationError};

/// Legal target statuses for a given source status.
pub fn allowed_transitions(from: CampaignStatus) -> &'static [CampaignStatus] {
    use CampaignStatus::*;
    match from {
        Draft => &[Review, Cancelled],
        Review => &[Live, Draft, Cancelled],
        Live => &[Funded, Closed, Cancelled],
        Funded => &[Cancelled],
        Closed => &[Cancelled],
        Cancelled => &[],
    }
}

/// Whether `from -> to` is in the transition table.
///
/// Self-transitions are never legal.
pub fn can_transition(from: CampaignStatus, to: CampaignStatus) -> bool {
    from != to && allowed_transitions(from).contains(&to)
}

/// Validates and performs a status transition in place.
///
/// Returns the old status on success. On failure the campaign is untouched;
/// the transition is never partially applied.
pub fn apply_transition(campaign: &mut Campaign, new_status: CampaignStatus) -> Result<CampaignStatus> {
    let old_status = campaign.status;
    if !can_transition(old_status, new_status) {
        return Err(Error::InvalidTransition {
            from: old_status,
            to: new_status,
        });
    }
    // A campaign may not be submitted for review without an end date; the
    // scheduler's auto-close scan depends on it.
    if old_status == CampaignStatus::Draft
        && new_status == CampaignStatus::Review
        && campaign.end_date.is_none()
    {
        return Err(Error::Validation(ValidationError::MissingField(
            "endDate".to_string(),
        )));
    }
    campaign.status = new_status;
    Ok(old_status)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn campaign_in(status: CampaignStatus) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            issuer_id: "i1".to_string(),
            name: "Test Campaign".to_string(),
            status,
            target_amount: dec!(1000),
            raised_amount: dec!(0),
            share_price: dec!(10),
            total_shares: None,
            sold_shares: 0,
            version: 0,
            start_date: Some(Utc::now()),
            end_date: Some(Utc::now() + Duration::days(30)),
            funded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_to_funded_succeeds() {
        let mut campaign = campaign_in(CampaignStatus::Live);
        let old = apply_transition(&mut campaign, CampaignStatus::Funded).unwrap();
        assert_eq!(old, CampaignStatus::Live);
        assert_eq!(campaign.status, CampaignStatus::Funded);
    }

    #[test]
    fn test_funded_to_live_fails() {
        let mut campaign = campaign_in(CampaignStatus::Funded);
        let err = apply_transition(&mut campaign, CampaignStatus::Live).unwrap_err();
        match err {
            Error::InvalidTransition { from, to } => {
                assert_eq!(from, CampaignStatus::Funded);
                assert_eq!(to, CampaignStatus::Live);
            }
            other => panic!("Expected InvalidTransition, got {other}"),
        }
        // Never partially applied
        assert_eq!(campaign.status, CampaignStatus::Funded);
    }

    #[test]
    fn test_self_transition_always_fails() {
        for status in [
            CampaignStatus::Draft,
            CampaignStatus::Review,
            CampaignStatus::Live,
            CampaignStatus::Funded,
            CampaignStatus::Closed,
            CampaignStatus::Cancelled,
        ] {
            let mut campaign = campaign_in(status);
            assert!(matches!(
                apply_transition(&mut campaign, status),
                Err(Error::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(allowed_transitions(CampaignStatus::Cancelled).is_empty());
        let mut campaign = campaign_in(CampaignStatus::Cancelled);
        assert!(apply_transition(&mut campaign, CampaignStatus::Draft).is_err());
    }

    #[test]
    fn test_review_can_return_to_draft() {
        let mut campaign = campaign_in(CampaignStatus::Review);
        apply_transition(&mut campaign, CampaignStatus::Draft).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Draft);
    }

    #[test]
    fn test_draft_to_review_requires_end_date() {
        let mut campaign = campaign_in(CampaignStatus::Draft);
        campaign.end_date = None;
        assert!(matches!(
            apply_transition(&mut campaign, CampaignStatus::Review),
            Err(Error::Validation(_))
        ));
        assert_eq!(campaign.status, CampaignStatus::Draft);

        // Cancelling an unfinished draft stays legal.
        apply_transition(&mut campaign, CampaignStatus::Cancelled).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Cancelled);
    }

    #[test]
    fn test_transition_table_pairs() {
        use CampaignStatus::*;
        let cases: &[(CampaignStatus, CampaignStatus, bool)] = &[
            (Draft, Review, true),
            (Draft, Live, false),
            (Review, Live, true),
            (Review, Draft, true),
            (Review, Funded, false),
            (Live, Funded, true),
            (Live, Closed, true),
            (Live, Cancelled, true),
            (Live, Draft, false),
            (Funded, Cancelled, true),
            (Funded, Closed, false),
            (Closed, Cancelled, true),
            (Closed, Live, false),
        ];
        for (from, to, expected) in cases {
            assert_eq!(
                can_transition(*from, *to),
                *expected,
                "transition {from} -> {to}"
            );
        }
    }
}
