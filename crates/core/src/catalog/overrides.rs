use crate::catalog::Catalog;
use crate::domain::profile::Band;
use anyhow::{ensure, Context};
use std::collections::BTreeMap;
use std::path::Path;

/// Preset weights keyed by band, then by exact product name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightOverrides {
    by_band: BTreeMap<Band, BTreeMap<String, u32>>,
}

/// A preset whose product name does not exist in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanOverride {
    pub band: Band,
    pub name: String,
}

impl WeightOverrides {
    pub fn new(by_band: BTreeMap<Band, BTreeMap<String, u32>>) -> anyhow::Result<Self> {
        for (band, table) in &by_band {
            for (name, weight) in table {
                ensure!(
                    *weight <= 100,
                    "preset weight must be 0..=100 (band={band:?}, product={name}, got {weight})"
                );
            }
        }
        Ok(Self { by_band })
    }

    /// Parses `{"growth": {"<product>": <percent>, ...}, "balanced": {...}, ...}`.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let by_band = serde_json::from_str::<BTreeMap<Band, BTreeMap<String, u32>>>(json)
            .context("weight overrides are not a valid JSON band table")?;
        Self::new(by_band)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read weight overrides {}", path.display()))?;
        let overrides = Self::from_json_str(&raw)
            .with_context(|| format!("invalid weight overrides {}", path.display()))?;
        tracing::info!(path = %path.display(), bands = overrides.by_band.len(), "loaded weight overrides");
        Ok(overrides)
    }

    pub fn builtin() -> Self {
        let table = |rows: &[(&str, u32)]| -> BTreeMap<String, u32> {
            rows.iter().map(|(n, w)| (n.to_string(), *w)).collect()
        };

        let mut by_band = BTreeMap::new();
        by_band.insert(
            Band::Growth,
            table(&[
                ("SBI Small Cap Fund", 40),
                ("SBI Bluechip Fund", 30),
                ("SBI contra fund", 30),
            ]),
        );
        by_band.insert(
            Band::Balanced,
            table(&[
                ("SBI Equity Hybrid Fund", 40),
                ("SBI Balanced Advantage Fund", 30),
                ("SBI Bluechip Fund", 30),
            ]),
        );
        by_band.insert(
            Band::Conservative,
            table(&[
                ("SBI Liquid Fund", 50),
                ("SBI Debt Fund", 30),
                ("SBI Equity Hybrid Fund", 20),
            ]),
        );

        Self { by_band }
    }

    pub fn lookup(&self, band: Band, name: &str) -> Option<u32> {
        self.by_band.get(&band)?.get(name).copied()
    }

    pub fn orphans(&self, catalog: &Catalog) -> Vec<OrphanOverride> {
        let mut out = Vec::new();
        for (band, table) in &self.by_band {
            for name in table.keys() {
                if !catalog.contains(name) {
                    out.push(OrphanOverride {
                        band: *band,
                        name: name.clone(),
                    });
                }
            }
        }
        out
    }
}
