use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Canonical demo catalog contract: one entry per seeded product.
const SEED_PRODUCTS: &[SeedProductContract] = &[
    SeedProductContract {
        product_id: "lens-cv-asp-156",
        name: "Chemi Crystal U2 1.56 ASP",
        is_active: true,
        expected_tier_count: 2,
        expected_score_count: 4,
        description: "Entry-level aspheric single vision",
    },
    SeedProductContract {
        product_id: "lens-kodak-ub-160",
        name: "Kodak UVBlue 1.60",
        is_active: true,
        expected_tier_count: 2,
        expected_score_count: 4,
        description: "Blue-light filter, on sale",
    },
    SeedProductContract {
        product_id: "lens-hoya-spv-167",
        name: "Hoya Stellify 1.67",
        is_active: true,
        expected_tier_count: 2,
        expected_score_count: 4,
        description: "High-index thin lens for strong prescriptions",
    },
    SeedProductContract {
        product_id: "lens-essilor-trans-g8",
        name: "Essilor Transitions Gen 8 1.59",
        is_active: true,
        expected_tier_count: 2,
        expected_score_count: 4,
        description: "Photochromic, one supplier tier suspended",
    },
    SeedProductContract {
        product_id: "lens-zeiss-smt-174",
        name: "Zeiss SmartLife 1.74",
        is_active: true,
        expected_tier_count: 1,
        expected_score_count: 4,
        description: "Ultra-thin premium, custom order only",
    },
    SeedProductContract {
        product_id: "lens-discontinued-pc",
        name: "PhotoBrown PC 1.50",
        is_active: false,
        expected_tier_count: 1,
        expected_score_count: 1,
        description: "Discontinued product kept for history",
    },
];

const SEED_USE_CASES: &[(&str, &str)] = &[
    ("computer_work", "Làm việc máy tính"),
    ("driving", "Lái xe"),
    ("outdoor", "Hoạt động ngoài trời"),
    ("reading", "Đọc sách"),
];

const SEED_TIER_IDS: &[&str] = &[
    "tier-cv156-instore",
    "tier-cv156-factory",
    "tier-kodak160-instore",
    "tier-kodak160-nextday",
    "tier-hoya167-nextday",
    "tier-hoya167-custom",
    "tier-trans-g8-custom",
    "tier-trans-g8-factory",
    "tier-zeiss174-custom",
    "tier-pcold-instore",
];

/// The one seeded tier that is switched off. Its product stays active, so
/// the matcher must skip the tier rather than the product.
const INACTIVE_TIER_ID: &str = "tier-trans-g8-factory";

/// Deterministic demo catalog for local development and runtime checks.
///
/// Covers the states the recommender must handle: products with and without
/// sale prices, tiers with price adjustments, an inactive tier on an active
/// product, and a fully discontinued product.
pub struct DemoCatalog;

impl DemoCatalog {
    /// SQL fixture content for the demo catalog.
    pub const SQL: &str = include_str!("../../../config/fixtures/demo_catalog.sql");

    /// Load the demo catalog into the database. Reloading converges to the
    /// same state; the fixture uses INSERT OR REPLACE throughout.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let products_seeded = SEED_PRODUCTS
            .iter()
            .map(|product| ProductSeedInfo {
                product_id: product.product_id,
                name: product.name,
                description: product.description,
            })
            .collect::<Vec<_>>();

        Ok(SeedResult { products_seeded })
    }

    /// Verify that the seeded rows exist and match the contract.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for (code, name) in SEED_USE_CASES.iter().copied() {
            let use_case_ok: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM use_cases WHERE code = ?1 AND name = ?2)",
            )
            .bind(code)
            .bind(name)
            .fetch_one(pool)
            .await?;
            checks.push((code, use_case_ok == 1));
        }

        for product in SEED_PRODUCTS {
            let product_ok: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1 AND name = ?2 AND is_active = ?3)",
            )
            .bind(product.product_id)
            .bind(product.name)
            .bind(product.is_active)
            .fetch_one(pool)
            .await?;
            checks.push((product.product_id, product_ok == 1));

            let tier_count: i64 =
                sqlx::query_scalar("SELECT COUNT(1) FROM supply_tiers WHERE product_id = ?1")
                    .bind(product.product_id)
                    .fetch_one(pool)
                    .await?;
            checks.push((product.tier_count_label(), tier_count == product.expected_tier_count));

            let score_count: i64 = sqlx::query_scalar(
                "SELECT COUNT(1) FROM product_use_case_scores WHERE product_id = ?1",
            )
            .bind(product.product_id)
            .fetch_one(pool)
            .await?;
            checks.push((product.score_count_label(), score_count == product.expected_score_count));
        }

        let inactive_tier: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM supply_tiers WHERE id = ?1 AND is_active = 0)",
        )
        .bind(INACTIVE_TIER_ID)
        .fetch_one(pool)
        .await?;
        checks.push(("inactive-supply-tier", inactive_tier == 1));

        let orphan_scores: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM product_use_case_scores s
             LEFT JOIN use_cases u ON u.code = s.use_case_code
             WHERE u.code IS NULL",
        )
        .fetch_one(pool)
        .await?;
        checks.push(("scores-reference-known-use-cases", orphan_scores == 0));

        let all_present = checks.iter().all(|(_, exists)| *exists);
        Ok(VerificationResult { all_present, checks })
    }

    /// Remove the seeded rows from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;

        let quoted_products =
            sql_array_from_ids(&SEED_PRODUCTS.iter().map(|p| p.product_id).collect::<Vec<_>>());
        let quoted_tiers = sql_array_from_ids(SEED_TIER_IDS);
        let quoted_use_cases =
            sql_array_from_ids(&SEED_USE_CASES.iter().map(|(code, _)| *code).collect::<Vec<_>>());

        sqlx::query(&format!(
            "DELETE FROM product_use_case_scores WHERE product_id IN {quoted_products}"
        ))
        .execute(&mut *tx)
        .await?;
        sqlx::query(&format!("DELETE FROM supply_tiers WHERE id IN {quoted_tiers}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("DELETE FROM products WHERE id IN {quoted_products}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("DELETE FROM use_cases WHERE code IN {quoted_use_cases}"))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedProductContract {
    product_id: &'static str,
    name: &'static str,
    is_active: bool,
    expected_tier_count: i64,
    expected_score_count: i64,
    description: &'static str,
}

impl SeedProductContract {
    fn tier_count_label(&self) -> &'static str {
        match self.product_id {
            "lens-cv-asp-156" => "cv156-tier-count",
            "lens-kodak-ub-160" => "kodak160-tier-count",
            "lens-hoya-spv-167" => "hoya167-tier-count",
            "lens-essilor-trans-g8" => "trans-g8-tier-count",
            "lens-zeiss-smt-174" => "zeiss174-tier-count",
            _ => "discontinued-tier-count",
        }
    }

    fn score_count_label(&self) -> &'static str {
        match self.product_id {
            "lens-cv-asp-156" => "cv156-score-count",
            "lens-kodak-ub-160" => "kodak160-score-count",
            "lens-hoya-spv-167" => "hoya167-score-count",
            "lens-essilor-trans-g8" => "trans-g8-score-count",
            "lens-zeiss-smt-174" => "zeiss174-score-count",
            _ => "discontinued-score-count",
        }
    }
}

fn sql_array_from_ids(ids: &[&str]) -> String {
    let quoted = ids.iter().map(|id| format!("'{}'", id)).collect::<Vec<_>>().join(",");
    format!("({quoted})")
}

#[derive(Debug)]
pub struct SeedResult {
    pub products_seeded: Vec<ProductSeedInfo>,
}

#[derive(Debug)]
pub struct ProductSeedInfo {
    pub product_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
