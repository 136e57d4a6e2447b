use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use optica_core::domain::product::{CatalogProduct, Product, ProductId};
use optica_core::domain::supply_tier::{SupplyTier, TierType};
use optica_core::domain::use_case::{ProductUseCaseScore, UseCase, UseCaseCode};

use super::{CatalogProvider, RepositoryError};
use crate::DbPool;

/// SQLite-backed catalog provider. Loads the whole active catalog in three
/// queries and stitches tiers and scores onto their products in memory;
/// the catalog is small enough that one round trip per table beats N+1
/// per-product queries.
pub struct SqlCatalogProvider {
    pool: DbPool,
}

impl SqlCatalogProvider {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All quiz use cases in display order, for presenting choices to a
    /// customer (or listing valid codes to an operator).
    pub async fn fetch_use_cases(&self) -> Result<Vec<UseCase>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT code, name, icon, description
             FROM use_cases
             ORDER BY display_order, code",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(use_case_from_row).collect()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for SqlCatalogProvider {
    async fn fetch_active_products_with_tiers_and_scores(
        &self,
    ) -> Result<Vec<CatalogProduct>, RepositoryError> {
        let product_rows = sqlx::query(
            "SELECT id, name, price, sale_price, is_active
             FROM products
             WHERE is_active = 1
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let tier_rows = sqlx::query(
            "SELECT t.product_id, t.tier_type, t.sph_min, t.sph_max, t.cyl_min, t.cyl_max,
                    t.lead_time_days, t.stock_quantity, t.price_adjustment, t.is_active
             FROM supply_tiers t
             JOIN products p ON p.id = t.product_id
             WHERE p.is_active = 1
             ORDER BY t.product_id, t.id",
        )
        .fetch_all(&self.pool)
        .await?;

        let score_rows = sqlx::query(
            "SELECT s.product_id, s.use_case_code, u.name AS use_case_name, s.score, s.reasoning
             FROM product_use_case_scores s
             JOIN use_cases u ON u.code = s.use_case_code
             JOIN products p ON p.id = s.product_id
             WHERE p.is_active = 1
             ORDER BY s.product_id, s.use_case_code",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tiers_by_product: HashMap<String, Vec<SupplyTier>> = HashMap::new();
        for row in tier_rows {
            let (product_id, tier) = tier_from_row(row)?;
            tiers_by_product.entry(product_id).or_default().push(tier);
        }

        let mut scores_by_product: HashMap<String, Vec<ProductUseCaseScore>> = HashMap::new();
        for row in score_rows {
            let (product_id, score) = score_from_row(row)?;
            scores_by_product.entry(product_id).or_default().push(score);
        }

        let mut catalog = Vec::with_capacity(product_rows.len());
        for row in product_rows {
            let product = product_from_row(row)?;
            let tiers = tiers_by_product.remove(&product.id.0).unwrap_or_default();
            let scores = scores_by_product.remove(&product.id.0).unwrap_or_default();
            catalog.push(CatalogProduct { product, tiers, scores });
        }

        tracing::debug!(
            event_name = "catalog.fetch.completed",
            product_count = catalog.len(),
            "loaded active catalog"
        );

        Ok(catalog)
    }
}

fn product_from_row(row: SqliteRow) -> Result<Product, RepositoryError> {
    Ok(Product {
        id: ProductId(row.try_get("id")?),
        name: row.try_get("name")?,
        price: parse_price("price", row.try_get("price")?)?,
        sale_price: parse_optional_price("sale_price", row.try_get("sale_price")?)?,
        is_active: row.try_get("is_active")?,
    })
}

fn tier_from_row(row: SqliteRow) -> Result<(String, SupplyTier), RepositoryError> {
    let tier_type_raw = row.try_get::<String, _>("tier_type")?;
    let tier_type = TierType::from_str(&tier_type_raw)
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;

    let tier = SupplyTier {
        tier_type,
        sph_min: row.try_get("sph_min")?,
        sph_max: row.try_get("sph_max")?,
        cyl_min: row.try_get("cyl_min")?,
        cyl_max: row.try_get("cyl_max")?,
        lead_time_days: parse_u32("lead_time_days", row.try_get("lead_time_days")?)?,
        stock_quantity: parse_optional_u32("stock_quantity", row.try_get("stock_quantity")?)?,
        price_adjustment: parse_price("price_adjustment", row.try_get("price_adjustment")?)?,
        is_active: row.try_get("is_active")?,
    };

    // The schema carries CHECK constraints for this, but rows written before
    // those constraints existed (or through another tool) must not reach the
    // matcher in an inconsistent state.
    tier.validate().map_err(|error| RepositoryError::Decode(error.to_string()))?;

    Ok((row.try_get("product_id")?, tier))
}

fn use_case_from_row(row: SqliteRow) -> Result<UseCase, RepositoryError> {
    Ok(UseCase {
        code: UseCaseCode(row.try_get("code")?),
        name: row.try_get("name")?,
        icon: row.try_get("icon")?,
        description: row.try_get("description")?,
    })
}

fn score_from_row(row: SqliteRow) -> Result<(String, ProductUseCaseScore), RepositoryError> {
    let score = ProductUseCaseScore {
        code: UseCaseCode(row.try_get("use_case_code")?),
        name: row.try_get("use_case_name")?,
        score: parse_score("score", row.try_get("score")?)?,
        reasoning: row.try_get("reasoning")?,
    };

    Ok((row.try_get("product_id")?, score))
}

fn parse_price(column: &str, value: String) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(&value).map_err(|error| {
        RepositoryError::Decode(format!("invalid decimal in `{column}`: `{value}` ({error})"))
    })
}

fn parse_optional_price(
    column: &str,
    value: Option<String>,
) -> Result<Option<Decimal>, RepositoryError> {
    value.map(|price| parse_price(column, price)).transpose()
}

fn parse_u32(column: &str, value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| {
        RepositoryError::Decode(format!(
            "invalid value for `{column}` (expected non-negative u32): {value}"
        ))
    })
}

fn parse_optional_u32(column: &str, value: Option<i64>) -> Result<Option<u32>, RepositoryError> {
    value.map(|quantity| parse_u32(column, quantity)).transpose()
}

fn parse_score(column: &str, value: i64) -> Result<u8, RepositoryError> {
    match u8::try_from(value) {
        Ok(score) if score <= 100 => Ok(score),
        _ => Err(RepositoryError::Decode(format!(
            "invalid value for `{column}` (expected 0..=100): {value}"
        ))),
    }
}
