use crate::domain::profile::{Goal, ProductRisk};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub risk: ProductRisk,
    pub min_horizon_years: f64,
    /// Informational only; eligibility does not check it.
    #[serde(default)]
    pub max_horizon_years: Option<f64>,
    pub goals: BTreeSet<Goal>,
    pub description: String,
}

impl Product {
    pub fn suits(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }

    pub fn type_matches_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.product_type.contains(k))
    }
}
