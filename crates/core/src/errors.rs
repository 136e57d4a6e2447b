use thiserror::Error;

/// Failures raised where data crosses into the domain: parsing persisted
/// tier types and checking the interval invariants the matcher trusts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown supply tier type `{0}` (expected IN_STORE|NEXT_DAY|CUSTOM_ORDER|FACTORY_ORDER)")]
    UnknownTierType(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
