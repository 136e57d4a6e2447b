pub mod prescription;
pub mod product;
pub mod supply_tier;
pub mod use_case;
