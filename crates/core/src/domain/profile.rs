use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client risk tolerance, ordered from most to least conservative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Conservative,
    Low,
    Moderate,
    High,
    Aggressive,
}

/// Risk tier carried by a catalog product. There is no aggressive product tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductRisk {
    Conservative,
    Low,
    Moderate,
    High,
}

/// Selection band a client tier falls into. Category label, priority keywords and
/// preset weights are all keyed by band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Growth,
    Balanced,
    Conservative,
}

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Conservative,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::Aggressive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Conservative => "Conservative",
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::Aggressive => "Aggressive",
        }
    }

    /// Parses a client-supplied label, substituting `Moderate` for anything outside
    /// the recognised set.
    pub fn parse_or_default(label: &str) -> Self {
        match label.parse::<RiskTier>() {
            Ok(tier) => tier,
            Err(err) => {
                tracing::warn!(label, error = %err, "unrecognised risk tier; using Moderate");
                RiskTier::Moderate
            }
        }
    }

    /// Product tiers admitted for this client: the tier itself plus one adjacent,
    /// more conservative tier.
    pub fn allowed_product_risks(self) -> &'static [ProductRisk] {
        match self {
            RiskTier::Conservative => &[ProductRisk::Conservative],
            RiskTier::Low => &[ProductRisk::Low, ProductRisk::Conservative],
            RiskTier::Moderate => &[ProductRisk::Moderate, ProductRisk::Low],
            RiskTier::High => &[ProductRisk::High, ProductRisk::Moderate],
            RiskTier::Aggressive => &[ProductRisk::High],
        }
    }

    pub fn exact_product_risk(self) -> Option<ProductRisk> {
        match self {
            RiskTier::Conservative => Some(ProductRisk::Conservative),
            RiskTier::Low => Some(ProductRisk::Low),
            RiskTier::Moderate => Some(ProductRisk::Moderate),
            RiskTier::High => Some(ProductRisk::High),
            RiskTier::Aggressive => None,
        }
    }

    pub fn band(self) -> Band {
        match self {
            RiskTier::High | RiskTier::Aggressive => Band::Growth,
            RiskTier::Moderate => Band::Balanced,
            RiskTier::Low | RiskTier::Conservative => Band::Conservative,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RiskTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| EngineError::invalid_input("risk_tier", format!("unknown risk tier {s:?}")))
    }
}

impl Band {
    pub fn category(self) -> &'static str {
        match self {
            Band::Growth => "Equity - High Growth",
            Band::Balanced => "Hybrid - Balanced",
            Band::Conservative => "Debt / Hybrid - Conservative",
        }
    }

    /// Substrings of a product type that mark it as a priority pick for this band.
    pub fn priority_keywords(self) -> &'static [&'static str] {
        match self {
            Band::Growth => &["Small Cap", "Mid Cap", "Contra"],
            Band::Balanced => &["Hybrid", "Large & Mid Cap", "Bluechip"],
            Band::Conservative => &["Debt", "Liquid", "Hybrid - Conservative"],
        }
    }
}

/// Investment goal. Closed set; there is no fallback for unknown labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Retirement Planning")]
    RetirementPlanning,
    #[serde(rename = "Wealth Creation")]
    WealthCreation,
    #[serde(rename = "Child's Education")]
    ChildsEducation,
    #[serde(rename = "Tax Saving")]
    TaxSaving,
    #[serde(rename = "General Investment")]
    GeneralInvestment,
    #[serde(rename = "Short-term Capital Gain")]
    ShortTermCapitalGain,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::RetirementPlanning,
        Goal::WealthCreation,
        Goal::ChildsEducation,
        Goal::TaxSaving,
        Goal::GeneralInvestment,
        Goal::ShortTermCapitalGain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::RetirementPlanning => "Retirement Planning",
            Goal::WealthCreation => "Wealth Creation",
            Goal::ChildsEducation => "Child's Education",
            Goal::TaxSaving => "Tax Saving",
            Goal::GeneralInvestment => "General Investment",
            Goal::ShortTermCapitalGain => "Short-term Capital Gain",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Goal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| EngineError::invalid_input("goal", format!("unknown goal {s:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub risk_tier: RiskTier,
    pub horizon_years: f64,
    pub goal: Goal,
    pub amount: f64,
}

impl ClientProfile {
    pub fn new(
        risk_tier: RiskTier,
        horizon_years: f64,
        goal: Goal,
        amount: f64,
    ) -> Result<Self, EngineError> {
        validate_horizon(horizon_years)?;
        validate_amount(amount)?;
        Ok(Self {
            risk_tier,
            horizon_years,
            goal,
            amount,
        })
    }

    /// Builds a profile from raw labels. Unknown risk labels fall back to Moderate;
    /// unknown goals are rejected.
    pub fn from_labels(
        risk_label: &str,
        horizon_years: f64,
        goal_label: &str,
        amount: f64,
    ) -> Result<Self, EngineError> {
        let goal = goal_label.parse::<Goal>()?;
        Self::new(RiskTier::parse_or_default(risk_label), horizon_years, goal, amount)
    }
}

pub fn validate_horizon(horizon_years: f64) -> Result<(), EngineError> {
    if !horizon_years.is_finite() || horizon_years <= 0.0 {
        return Err(EngineError::invalid_input(
            "horizon_years",
            format!("must be a positive number of years (got {horizon_years})"),
        ));
    }
    Ok(())
}

/// Largest amount accepted for allocation. Keeps every rounded line and their sum
/// well inside `i64`.
pub const MAX_AMOUNT: f64 = 1e15;

pub fn validate_amount(amount: f64) -> Result<(), EngineError> {
    if amount > MAX_AMOUNT {
        return Err(EngineError::invalid_input(
            "amount",
            format!("must not exceed {MAX_AMOUNT} (got {amount})"),
        ));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::invalid_input(
            "amount",
            format!("must be a positive currency value (got {amount})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!("High".parse::<RiskTier>().unwrap(), RiskTier::High);
        assert_eq!(" Aggressive ".parse::<RiskTier>().unwrap(), RiskTier::Aggressive);
        assert!("high".parse::<RiskTier>().is_err());
        assert_eq!("Child's Education".parse::<Goal>().unwrap(), Goal::ChildsEducation);
        assert!("Retirement".parse::<Goal>().is_err());
    }

    #[test]
    fn unknown_risk_falls_back_to_moderate() {
        assert_eq!(RiskTier::parse_or_default("YOLO"), RiskTier::Moderate);
        assert_eq!(RiskTier::parse_or_default("Low"), RiskTier::Low);
    }

    #[test]
    fn each_tier_admits_itself_or_adjacent_conservative_tier() {
        assert_eq!(
            RiskTier::Conservative.allowed_product_risks(),
            &[ProductRisk::Conservative]
        );
        assert_eq!(
            RiskTier::Moderate.allowed_product_risks(),
            &[ProductRisk::Moderate, ProductRisk::Low]
        );
        assert_eq!(RiskTier::Aggressive.allowed_product_risks(), &[ProductRisk::High]);
        assert_eq!(RiskTier::Aggressive.exact_product_risk(), None);
    }

    #[test]
    fn bands_and_categories() {
        assert_eq!(RiskTier::Aggressive.band().category(), "Equity - High Growth");
        assert_eq!(RiskTier::Moderate.band().category(), "Hybrid - Balanced");
        assert_eq!(RiskTier::Low.band().category(), "Debt / Hybrid - Conservative");
        assert_eq!(RiskTier::Conservative.band(), Band::Conservative);
    }

    #[test]
    fn goal_serde_uses_display_labels() {
        let v = serde_json::to_value(Goal::ShortTermCapitalGain).unwrap();
        assert_eq!(v, serde_json::json!("Short-term Capital Gain"));
        let g: Goal = serde_json::from_value(serde_json::json!("Tax Saving")).unwrap();
        assert_eq!(g, Goal::TaxSaving);
    }

    #[test]
    fn profile_rejects_bad_horizon_amount_and_goal() {
        assert!(ClientProfile::new(RiskTier::Low, 0.0, Goal::TaxSaving, 1000.0).is_err());
        assert!(ClientProfile::new(RiskTier::Low, f64::NAN, Goal::TaxSaving, 1000.0).is_err());
        assert!(ClientProfile::new(RiskTier::Low, 1.0, Goal::TaxSaving, -5.0).is_err());
        assert!(ClientProfile::new(RiskTier::Low, 1.0, Goal::TaxSaving, 1.9e19).is_err());
        assert!(ClientProfile::new(RiskTier::Low, 1.0, Goal::TaxSaving, MAX_AMOUNT).is_ok());
        assert!(ClientProfile::from_labels("Low", 1.0, "Holiday", 1000.0).is_err());

        let p = ClientProfile::from_labels("Unknown", 3.0, "Wealth Creation", 5000.0).unwrap();
        assert_eq!(p.risk_tier, RiskTier::Moderate);
    }
}
