use async_trait::async_trait;
use thiserror::Error;

use optica_core::domain::product::CatalogProduct;

pub mod catalog;
pub mod memory;

pub use catalog::SqlCatalogProvider;
pub use memory::InMemoryCatalogProvider;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read-side source of recommendation candidates.
///
/// Implementations return every ACTIVE product together with all of its
/// supply tiers (active and inactive, so the engine can apply its own
/// availability rules) and its use-case score rows with display names
/// already joined in. Results are ordered by product id so identical
/// catalogs rank identically across calls and backends.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_active_products_with_tiers_and_scores(
        &self,
    ) -> Result<Vec<CatalogProduct>, RepositoryError>;
}
