use crate::domain::product::Product;
use crate::domain::profile::{Goal, RiskTier};
use std::collections::BTreeSet;

pub const MAX_SELECTIONS: usize = 3;
const PRIORITY_PICKS: usize = 2;
const OTHER_PICKS: usize = 1;

/// +1 for an exact tier match, +1 for goal suitability.
pub fn score(product: &Product, risk_tier: RiskTier, goal: Goal) -> u32 {
    let mut score = 0;
    if risk_tier.exact_product_risk() == Some(product.risk) {
        score += 1;
    }
    if product.suits(goal) {
        score += 1;
    }
    score
}

/// Category label for the tier. Independent of what gets selected.
pub fn category(risk_tier: RiskTier) -> &'static str {
    risk_tier.band().category()
}

/// Picks up to three candidates: the two best-scoring products whose type carries one
/// of the band's priority keywords, then the best of the rest.
pub fn select<'a>(candidates: &[&'a Product], risk_tier: RiskTier, goal: Goal) -> Vec<&'a Product> {
    let keywords = risk_tier.band().priority_keywords();

    let (priority, other): (Vec<&Product>, Vec<&Product>) = candidates
        .iter()
        .copied()
        .partition(|p| p.type_matches_any(keywords));

    let mut picked = top_by_score(priority, risk_tier, goal, PRIORITY_PICKS);
    picked.extend(top_by_score(other, risk_tier, goal, OTHER_PICKS));

    let mut seen = BTreeSet::<&str>::new();
    picked.retain(|&p| seen.insert(p.name.as_str()));
    picked.truncate(MAX_SELECTIONS);

    tracing::debug!(
        %risk_tier,
        %goal,
        candidates = candidates.len(),
        selected = picked.len(),
        "selected products"
    );
    picked
}

fn top_by_score<'a>(
    mut products: Vec<&'a Product>,
    risk_tier: RiskTier,
    goal: Goal,
    n: usize,
) -> Vec<&'a Product> {
    // sort_by_key is stable: equal scores keep catalog order.
    products.sort_by_key(|p| std::cmp::Reverse(score(p, risk_tier, goal)));
    products.truncate(n);
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::profile::ProductRisk;
    use crate::engine::filter::filter;

    fn product(name: &str, ty: &str, risk: ProductRisk) -> Product {
        Product {
            name: name.to_string(),
            product_type: ty.to_string(),
            risk,
            min_horizon_years: 0.0,
            max_horizon_years: None,
            goals: [Goal::WealthCreation].into_iter().collect(),
            description: format!("{name} description"),
        }
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn scores_exact_tier_and_goal() {
        let p = product("A", "Equity - Small Cap", ProductRisk::High);
        assert_eq!(score(&p, RiskTier::High, Goal::WealthCreation), 2);
        assert_eq!(score(&p, RiskTier::Aggressive, Goal::WealthCreation), 1);
        assert_eq!(score(&p, RiskTier::High, Goal::TaxSaving), 1);
    }

    #[test]
    fn growth_picks_two_priority_and_one_other() {
        let catalog = Catalog::builtin();
        let candidates = filter(&catalog, RiskTier::High, 10.0, Goal::WealthCreation);
        let out = select(&candidates, RiskTier::High, Goal::WealthCreation);
        assert_eq!(
            names(&out),
            vec!["SBI Small Cap Fund", "SBI contra fund", "SBI Bluechip Fund"]
        );
    }

    #[test]
    fn balanced_matches_keywords_on_type_not_name() {
        let catalog = Catalog::builtin();
        let candidates = filter(&catalog, RiskTier::Moderate, 5.0, Goal::WealthCreation);
        let out = select(&candidates, RiskTier::Moderate, Goal::WealthCreation);
        // Bluechip's type is "Equity - Large Cap", so it lands in the "other" partition.
        assert_eq!(
            names(&out),
            vec![
                "SBI Equity Hybrid Fund",
                "SBI Balanced Advantage Fund",
                "SBI Bluechip Fund",
            ]
        );
    }

    #[test]
    fn higher_score_beats_catalog_order() {
        let catalog = Catalog::builtin();
        let candidates = filter(&catalog, RiskTier::Low, 2.0, Goal::GeneralInvestment);
        let out = select(&candidates, RiskTier::Low, Goal::GeneralInvestment);
        assert_eq!(names(&out), vec!["SBI Debt Fund", "SBI Liquid Fund"]);
    }

    #[test]
    fn ties_keep_candidate_order_at_cutoff() {
        let a = product("A", "Equity - Small Cap", ProductRisk::Moderate);
        let b = product("B", "Equity - Mid Cap", ProductRisk::Moderate);
        let c = product("C", "Equity - Contra", ProductRisk::Moderate);
        let d = product("D", "Equity - Large Cap", ProductRisk::High);
        let candidates = vec![&a, &b, &c, &d];

        let out = select(&candidates, RiskTier::High, Goal::WealthCreation);
        assert_eq!(names(&out), vec!["A", "B", "D"]);

        // Raising C's score moves it ahead of the tied pair.
        let c_high = product("C", "Equity - Contra", ProductRisk::High);
        let candidates = vec![&a, &b, &c_high, &d];
        let out = select(&candidates, RiskTier::High, Goal::WealthCreation);
        assert_eq!(names(&out), vec!["C", "A", "D"]);
    }

    #[test]
    fn never_more_than_three_and_empty_stays_empty() {
        let catalog = Catalog::builtin();
        for tier in RiskTier::ALL {
            for goal in Goal::ALL {
                let candidates = filter(&catalog, tier, 30.0, goal);
                let out = select(&candidates, tier, goal);
                assert!(out.len() <= MAX_SELECTIONS);
                assert_eq!(out, select(&candidates, tier, goal));
            }
        }
        assert!(select(&[], RiskTier::Moderate, Goal::WealthCreation).is_empty());
    }

    #[test]
    fn only_priority_products_yields_at_most_two() {
        let a = product("A", "Debt - Liquid", ProductRisk::Low);
        let b = product("B", "Debt - Gilt", ProductRisk::Low);
        let c = product("C", "Debt - Credit Risk", ProductRisk::Low);
        let out = select(&[&a, &b, &c], RiskTier::Low, Goal::WealthCreation);
        assert_eq!(names(&out), vec!["A", "B"]);
    }

    #[test]
    fn category_depends_only_on_tier() {
        assert_eq!(category(RiskTier::High), "Equity - High Growth");
        assert_eq!(category(RiskTier::Aggressive), "Equity - High Growth");
        assert_eq!(category(RiskTier::Moderate), "Hybrid - Balanced");
        assert_eq!(category(RiskTier::Low), "Debt / Hybrid - Conservative");
        assert_eq!(category(RiskTier::Conservative), "Debt / Hybrid - Conservative");
    }
}
