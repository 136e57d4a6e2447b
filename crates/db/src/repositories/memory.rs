use std::collections::HashMap;

use tokio::sync::RwLock;

use optica_core::domain::product::CatalogProduct;

use super::{CatalogProvider, RepositoryError};

/// Catalog provider backed by a map in process memory. Used by tests and by
/// embedders that assemble a catalog programmatically instead of running a
/// database.
#[derive(Default)]
pub struct InMemoryCatalogProvider {
    products: RwLock<HashMap<String, CatalogProduct>>,
}

impl InMemoryCatalogProvider {
    /// Build a provider pre-populated with the given catalog entries.
    pub async fn with_products(entries: Vec<CatalogProduct>) -> Self {
        let provider = Self::default();
        for entry in entries {
            provider.upsert(entry).await;
        }
        provider
    }

    /// Insert or replace one catalog entry, keyed by product id.
    pub async fn upsert(&self, entry: CatalogProduct) {
        let mut products = self.products.write().await;
        products.insert(entry.product.id.0.clone(), entry);
    }
}

#[async_trait::async_trait]
impl CatalogProvider for InMemoryCatalogProvider {
    async fn fetch_active_products_with_tiers_and_scores(
        &self,
    ) -> Result<Vec<CatalogProduct>, RepositoryError> {
        let products = self.products.read().await;
        let mut catalog: Vec<CatalogProduct> =
            products.values().filter(|entry| entry.product.is_active).cloned().collect();
        // Same ordering contract as the SQL provider.
        catalog.sort_by(|a, b| a.product.id.0.cmp(&b.product.id.0));
        Ok(catalog)
    }
}
