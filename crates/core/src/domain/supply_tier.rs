use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::prescription::Prescription;
use crate::errors::DomainError;

/// Fulfillment channels for a prescription range, from fastest to slowest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TierType {
    InStore,
    NextDay,
    CustomOrder,
    FactoryOrder,
}

impl TierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStore => "IN_STORE",
            Self::NextDay => "NEXT_DAY",
            Self::CustomOrder => "CUSTOM_ORDER",
            Self::FactoryOrder => "FACTORY_ORDER",
        }
    }
}

impl std::str::FromStr for TierType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "IN_STORE" => Ok(Self::InStore),
            "NEXT_DAY" => Ok(Self::NextDay),
            "CUSTOM_ORDER" => Ok(Self::CustomOrder),
            "FACTORY_ORDER" => Ok(Self::FactoryOrder),
            other => Err(DomainError::UnknownTierType(other.to_string())),
        }
    }
}

/// One way a product can be fulfilled, valid over a closed rectangle of
/// prescription space. A product typically declares several tiers with
/// different ranges and lead times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplyTier {
    pub tier_type: TierType,
    pub sph_min: f64,
    pub sph_max: f64,
    pub cyl_min: f64,
    pub cyl_max: f64,
    pub lead_time_days: u32,
    pub stock_quantity: Option<u32>,
    pub price_adjustment: Decimal,
    pub is_active: bool,
}

impl SupplyTier {
    /// Closed-interval containment on both axes; boundary values count as
    /// covered. An inverted interval covers nothing.
    pub fn covers(&self, prescription: &Prescription) -> bool {
        self.sph_min <= prescription.sphere
            && prescription.sphere <= self.sph_max
            && self.cyl_min <= prescription.cylinder
            && prescription.cylinder <= self.cyl_max
    }

    /// Interval sanity check enforced where tiers enter the system.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.sph_min > self.sph_max {
            return Err(DomainError::InvariantViolation(format!(
                "inverted sphere interval [{}, {}]",
                self.sph_min, self.sph_max
            )));
        }
        if self.cyl_min > self.cyl_max {
            return Err(DomainError::InvariantViolation(format!(
                "inverted cylinder interval [{}, {}]",
                self.cyl_min, self.cyl_max
            )));
        }
        Ok(())
    }
}
