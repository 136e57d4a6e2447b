//! Types for the recommendation engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::prescription::Prescription;
use crate::domain::product::Product;
use crate::domain::supply_tier::SupplyTier;
use crate::domain::use_case::UseCaseCode;

/// One quiz submission: what the customer needs and what they can spend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswers {
    /// Use cases the customer selected, by code.
    pub use_cases: Vec<UseCaseCode>,
    /// Sphere power of the target prescription, in diopters.
    pub sphere: f64,
    /// Cylinder power of the target prescription, in diopters.
    pub cylinder: f64,
    /// Inclusive lower budget bound, if the customer named one.
    pub budget_min: Option<Decimal>,
    /// Inclusive upper budget bound, if the customer named one.
    pub budget_max: Option<Decimal>,
}

impl QuizAnswers {
    /// Create a quiz submission for a prescription with no use cases and no
    /// budget constraints.
    pub fn new(sphere: f64, cylinder: f64) -> Self {
        Self { use_cases: Vec::new(), sphere, cylinder, budget_min: None, budget_max: None }
    }

    /// Set the requested use cases.
    pub fn with_use_cases(mut self, use_cases: Vec<UseCaseCode>) -> Self {
        self.use_cases = use_cases;
        self
    }

    /// Set the budget window. Either bound may be open.
    pub fn with_budget(mut self, budget_min: Option<Decimal>, budget_max: Option<Decimal>) -> Self {
        self.budget_min = budget_min;
        self.budget_max = budget_max;
        self
    }

    pub fn prescription(&self) -> Prescription {
        Prescription::new(self.sphere, self.cylinder)
    }
}

/// A requested use case the product actually has a score row for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedUseCase {
    pub code: UseCaseCode,
    pub name: String,
    pub score: u8,
}

/// Aggregated suitability of one product for a set of requested use cases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suitability {
    /// Rounded average over the REQUESTED use cases, 0..=100.
    pub total_score: u8,
    /// Matched entries in descending score order.
    pub matched: Vec<MatchedUseCase>,
}

/// One ranked entry of a recommendation response. Built fresh per quiz and
/// never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: Product,
    /// Aggregate use-case fit, 0..=100.
    pub total_score: u8,
    /// Matched use cases in descending score order.
    pub matched_use_cases: Vec<MatchedUseCase>,
    /// The tier that will fulfill the prescription.
    pub available_tier: SupplyTier,
    /// Human-readable justification for display; nothing parses it.
    pub reasoning: String,
}

impl Recommendation {
    /// Price the customer would pay through the surfaced tier: the product's
    /// effective price plus the tier's adjustment.
    pub fn quoted_price(&self) -> Decimal {
        self.product.final_price() + self.available_tier.price_adjustment
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};
    use crate::domain::supply_tier::{SupplyTier, TierType};
    use crate::domain::use_case::UseCaseCode;

    use super::{MatchedUseCase, QuizAnswers, Recommendation};

    #[test]
    fn builder_fills_a_full_submission() {
        let answers = QuizAnswers::new(-3.0, -1.0)
            .with_use_cases(vec![UseCaseCode::new("computer_work"), UseCaseCode::new("driving")])
            .with_budget(None, Some(Decimal::new(1_000_000, 0)));

        assert_eq!(answers.use_cases.len(), 2);
        assert_eq!(answers.prescription().sphere, -3.0);
        assert_eq!(answers.prescription().cylinder, -1.0);
        assert_eq!(answers.budget_min, None);
        assert_eq!(answers.budget_max, Some(Decimal::new(1_000_000, 0)));
    }

    #[test]
    fn quoted_price_includes_tier_adjustment() {
        let recommendation = Recommendation {
            product: Product {
                id: ProductId("lens-1".to_string()),
                name: "Test Lens".to_string(),
                price: Decimal::new(850_000, 0),
                sale_price: Some(Decimal::new(790_000, 0)),
                is_active: true,
            },
            total_score: 70,
            matched_use_cases: vec![MatchedUseCase {
                code: UseCaseCode::new("computer_work"),
                name: "Làm việc máy tính".to_string(),
                score: 80,
            }],
            available_tier: SupplyTier {
                tier_type: TierType::FactoryOrder,
                sph_min: -10.0,
                sph_max: -6.0,
                cyl_min: -4.0,
                cyl_max: 0.0,
                lead_time_days: 14,
                stock_quantity: None,
                price_adjustment: Decimal::new(150_000, 0),
                is_active: true,
            },
            reasoning: String::new(),
        };

        assert_eq!(recommendation.quoted_price(), Decimal::new(940_000, 0));
    }

    #[test]
    fn recommendation_serializes_with_wire_tier_names() {
        let recommendation = Recommendation {
            product: Product {
                id: ProductId("lens-1".to_string()),
                name: "Test Lens".to_string(),
                price: Decimal::new(450_000, 0),
                sale_price: None,
                is_active: true,
            },
            total_score: 50,
            matched_use_cases: Vec::new(),
            available_tier: SupplyTier {
                tier_type: TierType::InStore,
                sph_min: -6.0,
                sph_max: -1.0,
                cyl_min: -2.0,
                cyl_max: 0.0,
                lead_time_days: 0,
                stock_quantity: Some(12),
                price_adjustment: Decimal::ZERO,
                is_active: true,
            },
            reasoning: "có sẵn, lấy ngay".to_string(),
        };

        let payload = serde_json::to_value(&recommendation).expect("serialize recommendation");
        assert_eq!(payload["available_tier"]["tier_type"], "IN_STORE");
        assert_eq!(payload["total_score"], 50);
        assert_eq!(payload["product"]["id"], "lens-1");
    }
}
