use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::domain::profile::{Goal, RiskTier};

/// Products eligible for the client, in catalog order.
///
/// A product qualifies when its tier is admitted by `risk_tier`, its minimum horizon
/// fits within `horizon_years`, and it lists `goal`. The product's maximum horizon is
/// not checked.
pub fn filter<'a>(
    catalog: &'a Catalog,
    risk_tier: RiskTier,
    horizon_years: f64,
    goal: Goal,
) -> Vec<&'a Product> {
    let allowed = risk_tier.allowed_product_risks();
    catalog
        .products()
        .iter()
        .filter(|p| allowed.contains(&p.risk))
        .filter(|p| p.min_horizon_years <= horizon_years)
        .filter(|p| p.suits(goal))
        .collect()
}
