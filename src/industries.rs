//! Industry profile catalogue.

use crate::model::IndustryProfile;
use anyhow::{Context, Result};
use std::path::Path;

const BUILTIN: &str = include_str!("../data/industries.json");

#[derive(Debug, Clone)]
pub struct Catalogue {
    profiles: Vec<IndustryProfile>,
}

impl Catalogue {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN).context("parse built-in industry catalogue")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read industries file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse industries file {}", path.display()))
    }

    /// Load from `path` when given, else the built-in catalogue.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::builtin(),
        }
    }

    fn from_json(text: &str) -> Result<Self> {
        let profiles: Vec<IndustryProfile> = serde_json::from_str(text)?;
        for p in &profiles {
            if let Some(b) = &p.benchmark {
                if !(b.average <= b.good && b.good <= b.excellent) {
                    log::warn!("Benchmark thresholds for '{}' are not ascending", p.slug);
                }
            }
        }
        Ok(Self { profiles })
    }

    pub fn profiles(&self) -> &[IndustryProfile] {
        &self.profiles
    }

    pub fn get(&self, slug: &str) -> Option<&IndustryProfile> {
        self.profiles.iter().find(|p| p.slug == slug)
    }

    pub fn require(&self, slug: &str) -> Result<&IndustryProfile> {
        self.get(slug).ok_or_else(|| {
            anyhow::anyhow!("unknown industry '{slug}' (run `industries` to list valid slugs)")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_catalogue_is_well_formed() {
        let c = Catalogue::builtin().unwrap();
        assert!(c.profiles().len() >= 20);
        let mut slugs: Vec<&str> = c.profiles().iter().map(|p| p.slug.as_str()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), c.profiles().len(), "slugs must be unique");
        for p in c.profiles() {
            if let Some(b) = p.benchmark {
                assert!(b.average <= b.good && b.good <= b.excellent, "{}", p.slug);
            }
        }
    }

    #[test]
    fn lookup_by_slug() {
        let c = Catalogue::builtin().unwrap();
        assert_eq!(c.get("retail").unwrap().name, "Retail");
        assert!(c.get("nope").is_none());
        let err = c.require("nope").unwrap_err();
        assert!(err.to_string().contains("unknown industry"));
    }

    #[test]
    fn loads_custom_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ind.json");
        std::fs::write(
            &path,
            r#"[{"slug":"x","name":"X","output":{"label":"O","unit":"u"},
                "input":{"label":"I","unit":"h"},"resultLabel":"R","resultUnit":"u/h"}]"#,
        )
        .unwrap();
        let c = Catalogue::load(Some(&path)).unwrap();
        assert_eq!(c.profiles().len(), 1);
        assert!(c.get("x").unwrap().benchmark.is_none());
        assert!(Catalogue::load(Some(&dir.path().join("missing.json"))).is_err());
    }
}
