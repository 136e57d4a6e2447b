use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::supply_tier::SupplyTier;
use crate::domain::use_case::ProductUseCaseScore;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub is_active: bool,
}

impl Product {
    /// Effective selling price: the sale price when one is set.
    pub fn final_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }
}

/// A product together with everything the recommender needs to judge it:
/// its supply tiers (active and inactive) and its use-case score rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub product: Product,
    pub tiers: Vec<SupplyTier>,
    pub scores: Vec<ProductUseCaseScore>,
}
