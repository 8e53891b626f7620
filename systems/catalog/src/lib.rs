#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ordered catalog of named rules with their seeds, and the navigator hosts use to browse it.
//!
//! The catalog is plain data. Which entry is "current" lives in a [`Navigator`]
//! owned by the host, so the simulation only ever sees the single [`Rule`] and
//! [`Seed`] it was handed.

mod builtin;
mod manifest;

use autoscope_core::{Rule, Seed};
use thiserror::Error;

pub use manifest::SUPPORTED_CATALOG_VERSION;

/// Reasons a catalog or catalog entry cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A catalog must contain at least one rule.
    #[error("catalog contains no rules")]
    Empty,
    /// Every rule must offer at least one seed.
    #[error("rule `{rule}` lists no seeds")]
    NoSeeds {
        /// Name of the rule without seeds.
        rule: String,
    },
    /// Rule names identify entries and must be unique.
    #[error("catalog contains rule `{name}` more than once")]
    DuplicateRule {
        /// Name that appears more than once.
        name: String,
    },
}

/// A named rule together with the seeds that suit it.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    rule: Rule,
    seeds: Vec<Seed>,
}

impl CatalogEntry {
    /// Creates an entry, rejecting an empty seed list.
    pub fn new(rule: Rule, seeds: Vec<Seed>) -> Result<Self, CatalogError> {
        if seeds.is_empty() {
            return Err(CatalogError::NoSeeds {
                rule: rule.name().to_owned(),
            });
        }
        Ok(Self { rule, seeds })
    }

    /// Rule described by the entry.
    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Seeds offered for the rule, never empty.
    #[must_use]
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }
}

/// Non-empty, ordered collection of catalog entries with unique rule names.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a catalog from entries, rejecting empty catalogs and duplicate names.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, entry) in entries.iter().enumerate() {
            let name = entry.rule().name();
            if entries[..index].iter().any(|other| other.rule().name() == name) {
                return Err(CatalogError::DuplicateRule {
                    name: name.to_owned(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The catalog of rules shipped with Autoscope.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; catalogs are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry whose rule carries `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.rule().name() == name)
    }

    /// Entry whose rule carries `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.position(name).map(|index| &self.entries[index])
    }

    fn entry(&self, index: usize) -> &CatalogEntry {
        &self.entries[index % self.entries.len()]
    }
}

/// Host-owned cursor over a catalog with cyclic next/previous navigation.
///
/// Indices wrap in both directions. Changing the rule resets the seed
/// selection to the rule's first seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    rule_index: usize,
    seed_index: usize,
}

impl Navigator {
    /// Creates a navigator pointing at the first seed of the first rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rule_index: 0,
            seed_index: 0,
        }
    }

    /// Creates a navigator pointing at the rule called `name`, if present.
    #[must_use]
    pub fn at(catalog: &Catalog, name: &str) -> Option<Self> {
        catalog.position(name).map(|rule_index| Self {
            rule_index,
            seed_index: 0,
        })
    }

    /// Index of the selected rule.
    #[must_use]
    pub const fn rule_index(&self) -> usize {
        self.rule_index
    }

    /// Index of the selected seed within the selected rule.
    #[must_use]
    pub const fn seed_index(&self) -> usize {
        self.seed_index
    }

    /// Selected entry.
    #[must_use]
    pub fn current_entry<'catalog>(&self, catalog: &'catalog Catalog) -> &'catalog CatalogEntry {
        catalog.entry(self.rule_index)
    }

    /// Selected rule.
    #[must_use]
    pub fn current_rule<'catalog>(&self, catalog: &'catalog Catalog) -> &'catalog Rule {
        self.current_entry(catalog).rule()
    }

    /// Selected seed.
    #[must_use]
    pub fn current_seed(&self, catalog: &Catalog) -> Seed {
        let seeds = self.current_entry(catalog).seeds();
        seeds[self.seed_index % seeds.len()]
    }

    /// Moves the rule selection by `offset`, wrapping around, and selects its first seed.
    pub fn offset_rule<'catalog>(
        &mut self,
        catalog: &'catalog Catalog,
        offset: isize,
    ) -> &'catalog Rule {
        self.rule_index = wrap_offset(self.rule_index, offset, catalog.len());
        self.seed_index = 0;
        self.current_rule(catalog)
    }

    /// Moves the seed selection within the current rule by `offset`, wrapping around.
    pub fn offset_seed(&mut self, catalog: &Catalog, offset: isize) -> Seed {
        let seeds = self.current_entry(catalog).seeds().len();
        self.seed_index = wrap_offset(self.seed_index, offset, seeds);
        self.current_seed(catalog)
    }
}

fn wrap_offset(index: usize, offset: isize, len: usize) -> usize {
    let len = len as isize;
    (index as isize % len + offset % len).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, seeds: Vec<Seed>) -> CatalogEntry {
        CatalogEntry::new(Rule::life_like(name, &[2, 3], &[3]), seeds).expect("valid entry")
    }

    #[test]
    fn wrap_offset_handles_large_and_negative_offsets() {
        assert_eq!(wrap_offset(0, -1, 5), 4);
        assert_eq!(wrap_offset(4, 1, 5), 0);
        assert_eq!(wrap_offset(2, -12, 5), 0);
        assert_eq!(wrap_offset(2, 13, 5), 0);
        assert_eq!(wrap_offset(0, 0, 1), 0);
    }

    #[test]
    fn entry_without_seeds_is_rejected() {
        assert_eq!(
            CatalogEntry::new(Rule::conway(), Vec::new()),
            Err(CatalogError::NoSeeds {
                rule: "conway".to_owned()
            })
        );
    }

    #[test]
    fn empty_and_duplicate_catalogs_are_rejected() {
        assert_eq!(Catalog::new(Vec::new()), Err(CatalogError::Empty));
        assert_eq!(
            Catalog::new(vec![
                entry("a", vec![Seed::square(1)]),
                entry("a", vec![Seed::square(2)]),
            ]),
            Err(CatalogError::DuplicateRule {
                name: "a".to_owned()
            })
        );
    }

    #[test]
    fn navigator_tolerates_foreign_indices() {
        let catalog = Catalog::new(vec![entry("only", vec![Seed::square(1)])]).expect("valid");
        let navigator = Navigator {
            rule_index: 7,
            seed_index: 3,
        };
        assert_eq!(navigator.current_rule(&catalog).name(), "only");
        assert_eq!(navigator.current_seed(&catalog), Seed::square(1));
    }
}
