use crate::catalog::WeightOverrides;
use crate::domain::product::Product;
use crate::domain::profile::RiskTier;
use crate::domain::recommendation::Selection;

/// Attaches a percent weight to each selected product.
///
/// Products named in the band's preset table get that preset. Every other product gets
/// `round(100 / selected.len())`. The total is left as-is; mixing presets and
/// fallbacks can land away from 100.
pub fn assign_weights(
    selected: &[&Product],
    risk_tier: RiskTier,
    overrides: &WeightOverrides,
) -> Vec<Selection> {
    if selected.is_empty() {
        return Vec::new();
    }

    let band = risk_tier.band();
    let fallback = (100.0 / selected.len() as f64).round() as u32;

    selected
        .iter()
        .map(|p| {
            let weight = match overrides.lookup(band, &p.name) {
                Some(w) => w,
                None => {
                    tracing::debug!(product = %p.name, ?band, fallback, "no preset weight; using fallback");
                    fallback
                }
            };
            Selection {
                name: p.name.clone(),
                product_type: p.product_type.clone(),
                weight,
                rationale: p.description.clone(),
            }
        })
        .collect()
}

/// Rescales weights so they sum to exactly 100 using largest remainders. Ties go to the
/// earlier selection. A zero total is left untouched.
pub fn normalize_weights(selections: &mut [Selection]) {
    let total: u32 = selections.iter().map(|s| s.weight).sum();
    if total == 0 || total == 100 {
        return;
    }

    let mut floors = Vec::with_capacity(selections.len());
    let mut remainders = Vec::with_capacity(selections.len());
    for (idx, s) in selections.iter().enumerate() {
        let exact = f64::from(s.weight) * 100.0 / f64::from(total);
        let floor = exact.floor();
        floors.push(floor as u32);
        remainders.push((idx, exact - floor));
    }

    let assigned: u32 = floors.iter().sum();
    let shortfall = 100u32.saturating_sub(assigned) as usize;
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (idx, _) in remainders.into_iter().take(shortfall) {
        floors[idx] += 1;
    }

    for (s, w) in selections.iter_mut().zip(floors) {
        s.weight = w;
    }
    tracing::debug!(previous_total = total, "normalized weights to 100");
}
