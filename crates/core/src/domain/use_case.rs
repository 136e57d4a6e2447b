use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UseCaseCode(pub String);

impl UseCaseCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

/// Administrator-managed reference data describing one customer need
/// (e.g. `computer_work`, `driving`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub code: UseCaseCode,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// One product's scored fit for one use case, with the use case's display
/// name joined in by the catalog provider.
///
/// Absence of a row for a (product, use case) pair means "unscored", which
/// is not the same as a score of zero: unscored pairs contribute no matched
/// entry at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUseCaseScore {
    pub code: UseCaseCode,
    pub name: String,
    pub score: u8,
    pub reasoning: Option<String>,
}
