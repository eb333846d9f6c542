pub mod overrides;

use crate::domain::product::Product;
use crate::domain::profile::{Goal, ProductRisk};
use anyhow::{ensure, Context};
use std::collections::BTreeSet;
use std::path::Path;

pub use overrides::WeightOverrides;

/// Read-only product table. Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_products(products: Vec<Product>) -> anyhow::Result<Self> {
        let mut seen = BTreeSet::<String>::new();
        let mut out = Vec::with_capacity(products.len());
        for mut product in products {
            product.name = product.name.trim().to_string();
            ensure!(!product.name.is_empty(), "product name must be non-empty");
            ensure!(
                seen.insert(product.name.clone()),
                "duplicate product name: {}",
                product.name
            );
            ensure!(
                product.min_horizon_years.is_finite() && product.min_horizon_years >= 0.0,
                "min_horizon_years must be a non-negative number (product={}, got {})",
                product.name,
                product.min_horizon_years
            );
            if let Some(max) = product.max_horizon_years {
                ensure!(
                    max.is_finite() && max >= product.min_horizon_years,
                    "max_horizon_years must be >= min_horizon_years (product={}, got {max})",
                    product.name
                );
            }
            ensure!(
                !product.goals.is_empty(),
                "goal suitability must be non-empty (product={})",
                product.name
            );
            out.push(product);
        }

        Ok(Self { products: out })
    }

    /// Parses a JSON array of products.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let products = serde_json::from_str::<Vec<Product>>(json)
            .context("catalog is not a valid JSON array of products")?;
        Self::from_products(products)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("invalid catalog file {}", path.display()))?;
        tracing::info!(path = %path.display(), products = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// The built-in SBI fund table.
    pub fn builtin() -> Self {
        use Goal::*;
        use ProductRisk as R;

        let rows: [(&str, &str, ProductRisk, f64, Option<f64>, &[Goal], &str); 9] = [
            (
                "SBI Bluechip Fund",
                "Equity - Large Cap",
                R::Moderate,
                5.0,
                None,
                &[WealthCreation, RetirementPlanning],
                "Invests in large-cap companies. Suitable for stable long-term growth.",
            ),
            (
                "SBI Equity Hybrid Fund",
                "Hybrid - Aggressive Hybrid",
                R::Moderate,
                3.0,
                None,
                &[WealthCreation, RetirementPlanning],
                "Combines equity and debt for balanced growth. Good for moderate risk.",
            ),
            (
                "SBI Small Cap Fund",
                "Equity - Small Cap",
                R::High,
                7.0,
                None,
                &[WealthCreation, RetirementPlanning],
                "Focuses on high-growth small-cap companies. High risk, high reward.",
            ),
            (
                "SBI contra fund",
                "Equity - Contra",
                R::High,
                5.0,
                None,
                &[WealthCreation],
                "Invests in undervalued stocks. High risk, potential for high returns.",
            ),
            (
                "SBI Long Term Equity Fund",
                "ELSS",
                R::Moderate,
                3.0,
                None,
                &[TaxSaving, WealthCreation],
                "Tax-saving fund with equity exposure. 3-year lock-in.",
            ),
            (
                "SBI Large & Midcap Fund",
                "Equity - Large & Mid Cap",
                R::High,
                5.0,
                None,
                &[WealthCreation, RetirementPlanning],
                "Diversified across large and mid-cap companies.",
            ),
            (
                "SBI Balanced Advantage Fund",
                "Hybrid - Dynamic Asset Allocation",
                R::Moderate,
                3.0,
                None,
                &[WealthCreation, RetirementPlanning, GeneralInvestment],
                "Dynamically allocates between equity and debt based on market conditions.",
            ),
            (
                "SBI Debt Fund",
                "Debt - Short Duration",
                R::Low,
                1.0,
                Some(3.0),
                &[GeneralInvestment, ShortTermCapitalGain],
                "Invests in debt instruments with short maturity. Low risk.",
            ),
            (
                "SBI Liquid Fund",
                "Debt - Liquid",
                R::Conservative,
                0.1,
                Some(0.5),
                &[GeneralInvestment, ShortTermCapitalGain],
                "Highly liquid fund for very short-term parking of funds.",
            ),
        ];

        let products = rows
            .into_iter()
            .map(|(name, ty, risk, min, max, goals, description)| Product {
                name: name.to_string(),
                product_type: ty.to_string(),
                risk,
                min_horizon_years: min,
                max_horizon_years: max,
                goals: goals.iter().copied().collect(),
                description: description.to_string(),
            })
            .collect();

        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
