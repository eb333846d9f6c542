pub mod allocate;
pub mod filter;
pub mod select;
pub mod weights;

use crate::catalog::{Catalog, WeightOverrides};
use crate::domain::profile::{validate_horizon, ClientProfile, Goal, RiskTier};
use crate::domain::recommendation::{Allocation, Recommendation, Reconciliation, Selection};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Full pipeline output for one client profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub risk_tier: RiskTier,
    pub recommendation: Recommendation,
    pub allocations: Vec<Allocation>,
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Clone)]
pub struct Advisor {
    catalog: Arc<Catalog>,
    overrides: WeightOverrides,
    normalize: bool,
}

impl Advisor {
    pub fn new(catalog: Arc<Catalog>, overrides: WeightOverrides) -> Self {
        for orphan in overrides.orphans(&catalog) {
            tracing::warn!(
                band = ?orphan.band,
                product = %orphan.name,
                "preset weight refers to a product missing from the catalog; it will never apply"
            );
        }
        Self {
            catalog,
            overrides,
            normalize: false,
        }
    }

    pub fn builtin() -> Self {
        Self::new(Arc::new(Catalog::builtin()), WeightOverrides::builtin())
    }

    /// Rescale weights to exactly 100 after assignment.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Category and weighted selections for the client. An empty selection list means
    /// nothing in the catalog fits.
    pub fn recommend(
        &self,
        risk_tier: RiskTier,
        horizon_years: f64,
        goal: Goal,
    ) -> Result<Recommendation, EngineError> {
        validate_horizon(horizon_years)?;

        let candidates = filter::filter(&self.catalog, risk_tier, horizon_years, goal);
        let selected = select::select(&candidates, risk_tier, goal);
        let mut selections = weights::assign_weights(&selected, risk_tier, &self.overrides);
        if self.normalize {
            weights::normalize_weights(&mut selections);
        }

        let recommendation = Recommendation {
            category: select::category(risk_tier).to_string(),
            selections,
        };

        if recommendation.is_empty() {
            tracing::info!(%risk_tier, horizon_years, %goal, "no eligible products");
        } else if recommendation.weight_total() != 100 {
            tracing::info!(
                %risk_tier,
                %goal,
                weight_total = recommendation.weight_total(),
                "weights do not sum to 100"
            );
        }

        Ok(recommendation)
    }

    /// Recommendation plus currency allocation and its rounding reconciliation.
    pub fn advise(&self, profile: &ClientProfile) -> Result<Advice, EngineError> {
        let recommendation = self.recommend(profile.risk_tier, profile.horizon_years, profile.goal)?;
        let allocations = build_allocation(&recommendation.selections, profile.amount);
        let reconciliation = allocate::reconcile(&allocations, profile.amount);

        Ok(Advice {
            risk_tier: profile.risk_tier,
            recommendation,
            allocations,
            reconciliation,
        })
    }
}

pub fn build_allocation(selections: &[Selection], amount: f64) -> Vec<Allocation> {
    allocate::allocate(selections, amount)
}
