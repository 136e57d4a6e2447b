//! Human-readable justification strings.
//!
//! Vietnamese storefront copy assembled from the strongest matched use case
//! and the surfaced tier's availability. Presentation only; nothing
//! downstream parses these strings.

use crate::domain::supply_tier::{SupplyTier, TierType};

use super::types::MatchedUseCase;
use super::REASON_SEPARATOR;

/// Build the one-line justification shown beside a recommendation.
///
/// Leads with the head of the pre-sorted matched list (the strongest fit),
/// then the availability phrasing for the tier. Fragments that do not apply
/// are simply omitted.
pub fn build_reasoning(matched: &[MatchedUseCase], tier: &SupplyTier) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(2);

    if let Some(top) = matched.first() {
        parts.push(format!("Phù hợp với nhu cầu {} ({}/100 điểm)", top.name, top.score));
    }

    if let Some(phrase) = availability_phrase(tier) {
        parts.push(phrase);
    }

    parts.join(REASON_SEPARATOR)
}

fn availability_phrase(tier: &SupplyTier) -> Option<String> {
    match tier.tier_type {
        TierType::InStore => Some("có sẵn, lấy ngay".to_string()),
        TierType::NextDay => Some("giao trong 1 ngày".to_string()),
        TierType::CustomOrder | TierType::FactoryOrder if tier.lead_time_days > 0 => {
            Some(format!("giao trong {} ngày", tier.lead_time_days))
        }
        _ => None,
    }
}
