pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;

pub use domain::prescription::Prescription;
pub use domain::product::{CatalogProduct, Product, ProductId};
pub use domain::supply_tier::{SupplyTier, TierType};
pub use domain::use_case::{ProductUseCaseScore, UseCase, UseCaseCode};
pub use errors::DomainError;
pub use recommend::{
    aggregate_score, build_reasoning, find_available_tier, recommend, MatchedUseCase, QuizAnswers,
    Recommendation, Suitability,
};
