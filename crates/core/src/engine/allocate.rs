use crate::domain::recommendation::{Allocation, Reconciliation, Selection};

const ROUNDING_UNIT: f64 = 100.0;

/// Splits `total_amount` across the selections in proportion to their weights.
///
/// Each line is rounded to the nearest 100 on its own (ties to even) and the last line
/// is not trued up, so the lines may not add back to `total_amount`; see
/// [`reconcile`]. Empty input or a zero weight total yields an empty list.
pub fn allocate(selections: &[Selection], total_amount: f64) -> Vec<Allocation> {
    if selections.is_empty() {
        return Vec::new();
    }

    let total_weight: u32 = selections.iter().map(|s| s.weight).sum();
    if total_weight == 0 {
        tracing::warn!(selections = selections.len(), "total weight is zero; nothing to allocate");
        return Vec::new();
    }

    selections
        .iter()
        .map(|s| {
            let percentage = f64::from(s.weight) / f64::from(total_weight) * 100.0;
            Allocation {
                name: s.name.clone(),
                amount: round_to_hundred(total_amount * percentage / 100.0),
                percentage,
            }
        })
        .collect()
}

/// Compares the rounded lines with the requested total.
pub fn reconcile(allocations: &[Allocation], requested_total: f64) -> Reconciliation {
    let allocated: i128 = allocations.iter().map(|a| i128::from(a.amount)).sum();
    let allocated_total = saturate(allocated);
    let drift = saturate(allocated - requested_total.round() as i128);
    if drift != 0 && !allocations.is_empty() {
        tracing::info!(requested_total, allocated_total, drift, "allocation rounding drift");
    }
    Reconciliation {
        requested_total,
        allocated_total,
        drift,
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn round_to_hundred(value: f64) -> i64 {
    ((value / ROUNDING_UNIT).round_ties_even() * ROUNDING_UNIT) as i64
}
