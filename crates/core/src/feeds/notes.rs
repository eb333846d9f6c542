use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_NOTES_COUNT: usize = 5;

const NOTES: [&str; 8] = [
    "Equity markets continue to show resilience, with a focus on earnings growth in specific sectors.",
    "We are cautiously optimistic about mid-cap segment performance in the coming quarter.",
    "Inflationary pressures are being closely monitored; portfolio adjustments reflect defensive positioning where necessary.",
    "Debt market yields are stabilizing, presenting opportunities in short to medium duration instruments.",
    "Global economic factors remain a key watch point, influencing foreign institutional investment flows.",
    "Technology and healthcare sectors are showing strong fundamentals for long-term growth.",
    "Our strategic asset allocation remains consistent with long-term wealth creation objectives.",
    "New regulatory changes are being analyzed for their impact on mutual fund operations and investor returns.",
];

/// Up to `count` distinct fund manager notes, sampled reproducibly from `seed`.
pub fn manager_notes(seed: u64, count: usize) -> Vec<&'static str> {
    let mut rng = StdRng::seed_from_u64(seed);
    NOTES
        .choose_multiple(&mut rng, count.min(NOTES.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_same_notes() {
        assert_eq!(manager_notes(42, 5), manager_notes(42, 5));
    }

    #[test]
    fn samples_without_replacement() {
        let notes = manager_notes(7, DEFAULT_NOTES_COUNT);
        assert_eq!(notes.len(), DEFAULT_NOTES_COUNT);
        let distinct: BTreeSet<_> = notes.iter().collect();
        assert_eq!(distinct.len(), notes.len());
    }

    #[test]
    fn count_is_capped_at_available_notes() {
        assert_eq!(manager_notes(1, 50).len(), NOTES.len());
        assert!(manager_notes(1, 0).is_empty());
    }
}
