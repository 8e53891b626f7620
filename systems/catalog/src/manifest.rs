//! TOML catalog files.
//!
//! ```toml
//! version = 1
//!
//! [[rules]]
//! name = "bugs"
//! neighborhood = { kind = "square", radius = 5 }
//! survival = { ranges = [[34, 58]] }
//! birth = { ranges = [[34, 45]] }
//! seeds = [{ kind = "random", density = 0.5 }]
//! ```

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use autoscope_core::{Conditions, Neighborhood, Rule, Seed};
use serde::Deserialize;
use tracing::debug;

use crate::{Catalog, CatalogEntry};

/// Catalog file version understood by [`Catalog::from_toml_str`].
pub const SUPPORTED_CATALOG_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default)]
    rules: Vec<ManifestRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestRule {
    name: String,
    #[serde(default)]
    neighborhood: NeighborhoodSpec,
    #[serde(default)]
    survival: Conditions,
    #[serde(default)]
    birth: Conditions,
    seeds: Vec<Seed>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum NeighborhoodSpec {
    #[default]
    Moore,
    Square {
        radius: usize,
        #[serde(default = "include_center_by_default")]
        include_center: bool,
    },
    Mask {
        rows: Vec<Vec<u32>>,
    },
}

const fn include_center_by_default() -> bool {
    true
}

impl NeighborhoodSpec {
    fn build(self) -> Result<Neighborhood> {
        Ok(match self {
            Self::Moore => Neighborhood::moore(),
            Self::Square {
                radius,
                include_center,
            } => Neighborhood::try_square(radius, include_center)?,
            Self::Mask { rows } => Neighborhood::from_rows(&rows)?,
        })
    }
}

impl Catalog {
    /// Parses a catalog from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(contents).context("failed to parse catalog toml contents")?;
        if manifest.version != SUPPORTED_CATALOG_VERSION {
            bail!(
                "unsupported catalog version {}; expected {}",
                manifest.version,
                SUPPORTED_CATALOG_VERSION
            );
        }

        let mut entries = Vec::with_capacity(manifest.rules.len());
        for rule in manifest.rules {
            let name = rule.name;
            let neighborhood = rule
                .neighborhood
                .build()
                .with_context(|| format!("invalid neighborhood for rule `{name}`"))?;
            let entry = CatalogEntry::new(
                Rule::new(name, neighborhood, rule.survival, rule.birth),
                rule.seeds,
            )?;
            entries.push(entry);
        }

        Ok(Self::new(entries)?)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog at {}", path.display()))?;
        let catalog = Self::from_toml_str(&contents)
            .with_context(|| format!("invalid catalog at {}", path.display()))?;
        debug!(path = %path.display(), rules = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
