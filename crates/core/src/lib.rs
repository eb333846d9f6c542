pub mod catalog;
pub mod domain;
pub mod engine;
pub mod error;
pub mod feeds;

pub mod config {
    use crate::catalog::{Catalog, WeightOverrides};
    use crate::engine::Advisor;
    use crate::feeds::notes::DEFAULT_NOTES_COUNT;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub catalog_path: Option<PathBuf>,
        pub overrides_path: Option<PathBuf>,
        pub sentry_dsn: Option<String>,
        pub normalize_weights: bool,
        pub manager_notes_seed: u64,
        pub manager_notes_count: usize,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

            let normalize_weights = match non_empty("NORMALIZE_WEIGHTS") {
                Some(s) => parse_flag(&s)
                    .ok_or_else(|| anyhow::anyhow!("NORMALIZE_WEIGHTS must be true/false (got {s:?})"))?,
                None => false,
            };

            Ok(Self {
                catalog_path: non_empty("CATALOG_PATH").map(PathBuf::from),
                overrides_path: non_empty("OVERRIDES_PATH").map(PathBuf::from),
                sentry_dsn: non_empty("SENTRY_DSN"),
                normalize_weights,
                manager_notes_seed: non_empty("MANAGER_NOTES_SEED")
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(0),
                manager_notes_count: non_empty("MANAGER_NOTES_COUNT")
                    .and_then(|s| s.trim().parse::<usize>().ok())
                    .unwrap_or(DEFAULT_NOTES_COUNT),
            })
        }

        /// The configured catalog file, or the built-in table when none is set.
        pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
            match &self.catalog_path {
                Some(path) => Catalog::load(path),
                None => Ok(Catalog::builtin()),
            }
        }

        /// The configured preset weight table, or the built-in presets when none is set.
        pub fn load_overrides(&self) -> anyhow::Result<WeightOverrides> {
            match &self.overrides_path {
                Some(path) => WeightOverrides::load(path),
                None => Ok(WeightOverrides::builtin()),
            }
        }

        pub fn build_advisor(&self) -> anyhow::Result<Advisor> {
            let catalog = Arc::new(self.load_catalog()?);
            Ok(Advisor::new(catalog, self.load_overrides()?)
                .with_normalization(self.normalize_weights))
        }
    }

    fn parse_flag(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::profile::{Goal, RiskTier};
        use std::collections::HashMap;

        fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
            let env: HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| env.get(key).cloned())
        }

        #[test]
        fn defaults_when_unset() {
            let s = settings(&[]).unwrap();
            assert!(s.catalog_path.is_none());
            assert!(s.overrides_path.is_none());
            assert_eq!(s.load_overrides().unwrap(), WeightOverrides::builtin());
            assert!(s.sentry_dsn.is_none());
            assert!(!s.normalize_weights);
            assert_eq!(s.manager_notes_seed, 0);
            assert_eq!(s.manager_notes_count, DEFAULT_NOTES_COUNT);
            assert_eq!(s.load_catalog().unwrap().len(), 9);
        }

        #[test]
        fn reads_overrides() {
            let s = settings(&[
                ("NORMALIZE_WEIGHTS", "true"),
                ("MANAGER_NOTES_SEED", "17"),
                ("MANAGER_NOTES_COUNT", "3"),
                ("SENTRY_DSN", "  "),
            ])
            .unwrap();
            assert!(s.normalize_weights);
            assert_eq!(s.manager_notes_seed, 17);
            assert_eq!(s.manager_notes_count, 3);
            assert!(s.sentry_dsn.is_none());
        }

        #[test]
        fn rejects_bad_flag() {
            assert!(settings(&[("NORMALIZE_WEIGHTS", "maybe")]).is_err());
        }

        #[test]
        fn missing_catalog_file_is_an_error() {
            let s = settings(&[("CATALOG_PATH", "/nonexistent/fundgenius/catalog.json")]).unwrap();
            assert!(s.load_catalog().is_err());
        }

        #[test]
        fn custom_overrides_reach_the_advisor() {
            let path = std::env::temp_dir().join(format!(
                "fundgenius-overrides-{}.json",
                std::process::id()
            ));
            std::fs::write(&path, r#"{"growth": {"SBI Small Cap Fund": 60}}"#).unwrap();

            let s = settings(&[("OVERRIDES_PATH", path.to_str().unwrap())]).unwrap();
            let advisor = s.build_advisor();
            let _ = std::fs::remove_file(&path);

            let rec = advisor
                .unwrap()
                .recommend(RiskTier::High, 10.0, Goal::WealthCreation)
                .unwrap();
            let small_cap = rec
                .selections
                .iter()
                .find(|sel| sel.name == "SBI Small Cap Fund")
                .map(|sel| sel.weight);
            assert_eq!(small_cap, Some(60));
            // contra and Bluechip lose their presets and fall back to 100 / 3.
            assert_eq!(rec.weight_total(), 60 + 33 + 33);
        }
    }
}
