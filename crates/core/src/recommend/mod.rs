//! Lens Recommendation Engine
//!
//! Ranks the active catalog for one quiz submission: interval matching of
//! the prescription against supply tiers, use-case score aggregation, budget
//! filtering, and human-readable reasoning. Pure and synchronous; callers
//! load the catalog first (see the provider crate) and pass it in.

mod availability;
mod engine;
mod reasoning;
mod suitability;
mod types;

pub use availability::find_available_tier;
pub use engine::recommend;
pub use reasoning::build_reasoning;
pub use suitability::aggregate_score;
pub use types::{MatchedUseCase, QuizAnswers, Recommendation, Suitability};

/// Separator between reasoning fragments.
pub const REASON_SEPARATOR: &str = " • ";

/// Score ceiling for a single use case and for the aggregate.
pub const MAX_SCORE: u8 = 100;
