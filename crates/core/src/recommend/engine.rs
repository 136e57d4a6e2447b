//! Catalog-wide ranking.

use crate::domain::product::CatalogProduct;

use super::availability::find_available_tier;
use super::reasoning::build_reasoning;
use super::suitability::aggregate_score;
use super::types::{QuizAnswers, Recommendation};

/// Produce the ranked recommendation list for one quiz submission.
///
/// Availability and budget are hard filters: a product with no covering
/// active tier, or priced outside the budget window, is excluded entirely
/// rather than demoted. Survivors are ordered by descending total score;
/// equal totals surface the cheaper product first, and beyond that catalog
/// order is preserved.
pub fn recommend(products: &[CatalogProduct], answers: &QuizAnswers) -> Vec<Recommendation> {
    let prescription = answers.prescription();
    let mut recommendations: Vec<Recommendation> = Vec::new();

    for entry in products.iter().filter(|entry| entry.product.is_active) {
        let Some(tier) = find_available_tier(&entry.tiers, &prescription) else {
            continue;
        };

        let final_price = entry.product.final_price();
        if answers.budget_min.is_some_and(|min| final_price < min) {
            continue;
        }
        if answers.budget_max.is_some_and(|max| final_price > max) {
            continue;
        }

        let suitability = aggregate_score(&entry.scores, &answers.use_cases);
        let reasoning = build_reasoning(&suitability.matched, tier);

        recommendations.push(Recommendation {
            product: entry.product.clone(),
            total_score: suitability.total_score,
            matched_use_cases: suitability.matched,
            available_tier: tier.clone(),
            reasoning,
        });
    }

    recommendations.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.product.final_price().cmp(&b.product.final_price()))
    });

    recommendations
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{CatalogProduct, Product, ProductId};
    use crate::domain::supply_tier::{SupplyTier, TierType};
    use crate::domain::use_case::{ProductUseCaseScore, UseCaseCode};

    use super::super::types::QuizAnswers;
    use super::recommend;

    fn tier(
        tier_type: TierType,
        sph: (f64, f64),
        cyl: (f64, f64),
        lead_time_days: u32,
    ) -> SupplyTier {
        SupplyTier {
            tier_type,
            sph_min: sph.0,
            sph_max: sph.1,
            cyl_min: cyl.0,
            cyl_max: cyl.1,
            lead_time_days,
            stock_quantity: if lead_time_days == 0 { Some(12) } else { None },
            price_adjustment: Decimal::ZERO,
            is_active: true,
        }
    }

    fn score_row(code: &str, name: &str, score: u8) -> ProductUseCaseScore {
        ProductUseCaseScore {
            code: UseCaseCode::new(code),
            name: name.to_string(),
            score,
            reasoning: None,
        }
    }

    fn catalog_product(
        id: &str,
        price: i64,
        sale_price: Option<i64>,
        tiers: Vec<SupplyTier>,
        scores: Vec<ProductUseCaseScore>,
    ) -> CatalogProduct {
        CatalogProduct {
            product: Product {
                id: ProductId(id.to_string()),
                name: format!("Lens {id}"),
                price: Decimal::new(price, 0),
                sale_price: sale_price.map(|value| Decimal::new(value, 0)),
                is_active: true,
            },
            tiers,
            scores,
        }
    }

    fn two_tier_lens() -> CatalogProduct {
        catalog_product(
            "lens-a",
            850_000,
            None,
            vec![
                tier(TierType::InStore, (-6.0, -1.0), (-2.0, 0.0), 0),
                tier(TierType::FactoryOrder, (-10.0, -6.0), (-4.0, 0.0), 14),
            ],
            vec![
                score_row("computer_work", "Làm việc máy tính", 80),
                score_row("driving", "Lái xe", 60),
            ],
        )
    }

    fn quiz(sphere: f64, cylinder: f64, cases: &[&str]) -> QuizAnswers {
        QuizAnswers::new(sphere, cylinder)
            .with_use_cases(cases.iter().map(|code| UseCaseCode::new(*code)).collect())
    }

    #[test]
    fn in_range_prescription_surfaces_the_fast_tier_with_full_reasoning() {
        let catalog = [two_tier_lens()];

        let results = recommend(&catalog, &quiz(-3.0, -1.0, &["computer_work", "driving"]));

        assert_eq!(results.len(), 1);
        let entry = &results[0];
        assert_eq!(entry.available_tier.tier_type, TierType::InStore);
        assert_eq!(entry.total_score, 70);
        assert_eq!(entry.matched_use_cases.len(), 2);
        assert_eq!(entry.matched_use_cases[0].score, 80);
        assert_eq!(
            entry.reasoning,
            "Phù hợp với nhu cầu Làm việc máy tính (80/100 điểm) • có sẵn, lấy ngay"
        );
    }

    #[test]
    fn out_of_range_sphere_falls_through_to_the_slow_tier() {
        let catalog = [two_tier_lens()];

        let results = recommend(&catalog, &quiz(-8.0, -1.0, &["computer_work"]));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].available_tier.tier_type, TierType::FactoryOrder);
        assert!(results[0].reasoning.ends_with("giao trong 14 ngày"));
    }

    #[test]
    fn intervals_are_not_merged_across_tiers() {
        let catalog = [two_tier_lens()];

        // Sphere only fits the in-store tier, cylinder only the factory tier.
        let results = recommend(&catalog, &quiz(-3.0, -3.0, &["computer_work"]));

        assert!(results.is_empty());
    }

    #[test]
    fn products_without_any_covering_tier_are_excluded_not_demoted() {
        let strong_but_unavailable = catalog_product(
            "lens-far",
            500_000,
            None,
            vec![tier(TierType::InStore, (2.0, 6.0), (0.0, 0.0), 0)],
            vec![score_row("computer_work", "Làm việc máy tính", 100)],
        );
        let catalog = [strong_but_unavailable, two_tier_lens()];

        let results = recommend(&catalog, &quiz(-3.0, -1.0, &["computer_work"]));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.id.0, "lens-a");
    }

    #[test]
    fn budget_window_filters_on_final_price() {
        let discounted = catalog_product(
            "lens-sale",
            1_200_000,
            Some(900_000),
            vec![tier(TierType::InStore, (-6.0, -1.0), (-2.0, 0.0), 0)],
            vec![score_row("computer_work", "Làm việc máy tính", 50)],
        );
        let catalog = [discounted, two_tier_lens()];

        let capped = quiz(-3.0, -1.0, &["computer_work"])
            .with_budget(None, Some(Decimal::new(1_000_000, 0)));
        let results = recommend(&catalog, &capped);

        // Sale price 900k passes the cap, list price 850k passes too.
        assert_eq!(results.len(), 2);

        let floored = quiz(-3.0, -1.0, &["computer_work"])
            .with_budget(Some(Decimal::new(880_000, 0)), None);
        let results = recommend(&catalog, &floored);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.id.0, "lens-sale");
    }

    #[test]
    fn ranking_is_by_total_then_cheaper_then_catalog_order() {
        let pricey = catalog_product(
            "lens-pricey",
            2_000_000,
            None,
            vec![tier(TierType::InStore, (-6.0, -1.0), (-2.0, 0.0), 0)],
            vec![score_row("computer_work", "Làm việc máy tính", 70)],
        );
        let cheap = catalog_product(
            "lens-cheap",
            400_000,
            None,
            vec![tier(TierType::InStore, (-6.0, -1.0), (-2.0, 0.0), 0)],
            vec![score_row("computer_work", "Làm việc máy tính", 70)],
        );
        let twin_a = catalog_product(
            "lens-twin-a",
            400_000,
            None,
            vec![tier(TierType::InStore, (-6.0, -1.0), (-2.0, 0.0), 0)],
            vec![score_row("computer_work", "Làm việc máy tính", 40)],
        );
        let twin_b = catalog_product(
            "lens-twin-b",
            400_000,
            None,
            vec![tier(TierType::InStore, (-6.0, -1.0), (-2.0, 0.0), 0)],
            vec![score_row("computer_work", "Làm việc máy tính", 40)],
        );
        let catalog = [pricey, cheap, twin_a, twin_b];

        let results = recommend(&catalog, &quiz(-3.0, -1.0, &["computer_work"]));

        let order: Vec<&str> = results.iter().map(|entry| entry.product.id.0.as_str()).collect();
        assert_eq!(order, vec!["lens-cheap", "lens-pricey", "lens-twin-a", "lens-twin-b"]);
    }

    #[test]
    fn inactive_products_never_appear() {
        let mut retired = two_tier_lens();
        retired.product.id = ProductId("lens-retired".to_string());
        retired.product.is_active = false;
        let catalog = [retired, two_tier_lens()];

        let results = recommend(&catalog, &quiz(-3.0, -1.0, &["computer_work"]));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.id.0, "lens-a");
    }

    #[test]
    fn empty_use_case_list_still_ranks_available_products() {
        let catalog = [two_tier_lens()];

        let results = recommend(&catalog, &quiz(-3.0, -1.0, &[]));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total_score, 0);
        assert!(results[0].matched_use_cases.is_empty());
        assert_eq!(results[0].reasoning, "có sẵn, lấy ngay");
    }

    #[test]
    fn empty_catalog_yields_empty_results() {
        let results = recommend(&[], &quiz(-3.0, -1.0, &["computer_work"]));

        assert!(results.is_empty());
    }
}
