use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    pub product_type: String,
    /// Integer percent, 0..=100.
    pub weight: u32,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub selections: Vec<Selection>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Sum of weights. Not forced to 100 unless normalisation is enabled.
    pub fn weight_total(&self) -> u32 {
        self.selections.iter().map(|s| s.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    /// Currency units, always a multiple of 100.
    pub amount: i64,
    /// Unrounded share of the total weight.
    pub percentage: f64,
}

/// Difference between what was asked to be allocated and what the rounded lines add
/// up to. Reported, never corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub requested_total: f64,
    pub allocated_total: i64,
    pub drift: i64,
}

impl Reconciliation {
    pub fn is_exact(&self) -> bool {
        self.drift == 0
    }
}
