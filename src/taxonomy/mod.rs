//! Taxonomy discovery abstraction.
//!
//! Packages are grouped into three taxonomy types: collections, filters and
//! categories. Each taxonomy type supplies its own discovery rule deciding
//! which entities a package qualifies for; the classification engine only
//! depends on the [`Discovery`] interface.

mod rules;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use rules::{Rule, RuleBasedDiscovery};

use crate::package::Package;

/// Taxonomy type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Collection,
    Filter,
    Category,
}

impl TaxonomyKind {
    pub const ALL: [TaxonomyKind; 3] = [
        TaxonomyKind::Collection,
        TaxonomyKind::Filter,
        TaxonomyKind::Category,
    ];
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyKind::Collection => write!(f, "collection"),
            TaxonomyKind::Filter => write!(f, "filter"),
            TaxonomyKind::Category => write!(f, "category"),
        }
    }
}

impl FromStr for TaxonomyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "collection" => Ok(TaxonomyKind::Collection),
            "filter" => Ok(TaxonomyKind::Filter),
            "category" => Ok(TaxonomyKind::Category),
            _ => anyhow::bail!(
                "Unknown taxonomy kind: {}. Expected collection, filter, or category.",
                s
            ),
        }
    }
}

/// Discovery rule for one taxonomy type.
///
/// `discover` is a pure function of the package's current attributes and
/// the universe of existing taxonomy entities: it never mutates anything
/// and returns the full set the package currently qualifies for.
#[cfg_attr(test, mockall::automock)]
pub trait Discovery: Send + Sync {
    /// The taxonomy type this rule discovers for.
    fn kind(&self) -> TaxonomyKind;

    /// Compute which entities of this taxonomy type the package qualifies for.
    fn discover(&self, package: &Package) -> Result<BTreeSet<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_kind_parse() {
        assert_eq!(
            "collection".parse::<TaxonomyKind>().unwrap(),
            TaxonomyKind::Collection
        );
        assert_eq!(
            "Filter".parse::<TaxonomyKind>().unwrap(),
            TaxonomyKind::Filter
        );
        assert_eq!(
            "CATEGORY".parse::<TaxonomyKind>().unwrap(),
            TaxonomyKind::Category
        );
        assert!("tag".parse::<TaxonomyKind>().is_err());
    }

    #[test]
    fn test_taxonomy_kind_display() {
        assert_eq!(TaxonomyKind::Collection.to_string(), "collection");
        assert_eq!(TaxonomyKind::Filter.to_string(), "filter");
        assert_eq!(TaxonomyKind::Category.to_string(), "category");
    }
}
