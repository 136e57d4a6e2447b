//! Supply-availability matching.

use crate::domain::prescription::Prescription;
use crate::domain::supply_tier::SupplyTier;

/// Pick the tier that will fulfill `prescription`, if any.
///
/// Only active tiers whose closed intervals contain the prescription on both
/// axes are candidates. Among candidates the fastest one wins (ascending
/// `lead_time_days`); on equal lead times the first-declared tier is kept,
/// so a lens stocked in store never surfaces as a factory order.
pub fn find_available_tier<'a>(
    tiers: &'a [SupplyTier],
    prescription: &Prescription,
) -> Option<&'a SupplyTier> {
    tiers
        .iter()
        .filter(|tier| tier.is_active && tier.covers(prescription))
        .min_by_key(|tier| tier.lead_time_days)
}
