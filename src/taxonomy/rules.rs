//! Rule-based discovery over package attributes.
//!
//! Entities of each taxonomy type are described by small condition rules
//! matched against a package's normalized keywords, name and popularity.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::package::Package;

use super::{Discovery, TaxonomyKind};

/// One taxonomy entity and the conditions a package must meet to join it.
///
/// A rule with no conditions at all never matches; membership has to be
/// earned by at least one attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Name of the taxonomy entity this rule assigns.
    pub name: String,
    /// At least one of these keywords must be present.
    #[serde(default)]
    pub any_keywords: Vec<String>,
    /// All of these keywords must be present.
    #[serde(default)]
    pub all_keywords: Vec<String>,
    /// Substring the package name must contain.
    #[serde(default)]
    pub name_contains: Option<String>,
    /// Minimum repository star count.
    #[serde(default)]
    pub min_stars: Option<u64>,
}

impl Rule {
    fn has_conditions(&self) -> bool {
        !self.any_keywords.is_empty()
            || !self.all_keywords.is_empty()
            || self.name_contains.is_some()
            || self.min_stars.is_some()
    }

    fn matches(&self, package: &Package) -> bool {
        if !self.has_conditions() {
            return false;
        }

        let keywords = package.keywords();

        if !self.any_keywords.is_empty()
            && !self.any_keywords.iter().any(|k| keywords.contains(k))
        {
            return false;
        }

        if !self.all_keywords.iter().all(|k| keywords.contains(k)) {
            return false;
        }

        if let Some(fragment) = &self.name_contains
            && !package.name.to_lowercase().contains(&fragment.to_lowercase())
        {
            return false;
        }

        if let Some(min) = self.min_stars
            && package.stars < min
        {
            return false;
        }

        true
    }
}

/// Discovery implementation backed by a rule table for one taxonomy type.
pub struct RuleBasedDiscovery {
    kind: TaxonomyKind,
    rules: Vec<Rule>,
}

impl RuleBasedDiscovery {
    pub fn new(kind: TaxonomyKind, rules: Vec<Rule>) -> Self {
        Self { kind, rules }
    }

    /// Load the rule table from a JSON file. A missing file yields an
    /// empty table: the taxonomy simply assigns nothing.
    pub fn load(kind: TaxonomyKind, path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No {} rules at {:?}, using empty table", kind, path);
            return Ok(Self::new(kind, Vec::new()));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let rules: Vec<Rule> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} rules from {:?}", kind, path))?;
        Ok(Self::new(kind, rules))
    }
}

impl Discovery for RuleBasedDiscovery {
    fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    fn discover(&self, package: &Package) -> Result<BTreeSet<String>> {
        Ok(self
            .rules
            .iter()
            .filter(|rule| rule.matches(package))
            .map(|rule| rule.name.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rule(name: &str) -> Rule {
        Rule {
            name: name.into(),
            any_keywords: Vec::new(),
            all_keywords: Vec::new(),
            name_contains: None,
            min_stars: None,
        }
    }

    fn react_package() -> Package {
        let mut package = Package::new("react-modal");
        package.keywords = vec![Some("React".into()), Some("Component".into()), None];
        package.stars = 120;
        package
    }

    #[test]
    fn test_any_keywords() {
        let mut r = rule("React");
        r.any_keywords = vec!["react".into(), "react-native".into()];

        assert!(r.matches(&react_package()));
        assert!(!r.matches(&Package::new("plain")));
    }

    #[test]
    fn test_all_keywords() {
        let mut r = rule("React Components");
        r.all_keywords = vec!["react".into(), "component".into()];
        assert!(r.matches(&react_package()));

        r.all_keywords = vec!["react".into(), "redux".into()];
        assert!(!r.matches(&react_package()));
    }

    #[test]
    fn test_name_contains() {
        let mut r = rule("Modals");
        r.name_contains = Some("modal".into());
        assert!(r.matches(&react_package()));

        r.name_contains = Some("slider".into());
        assert!(!r.matches(&react_package()));
    }

    #[test]
    fn test_min_stars() {
        let mut r = rule("Popular");
        r.name_contains = Some("react".into());
        r.min_stars = Some(100);
        assert!(r.matches(&react_package()));

        r.min_stars = Some(1000);
        assert!(!r.matches(&react_package()));
    }

    #[test]
    fn test_rule_without_conditions_never_matches() {
        assert!(!rule("Everything").matches(&react_package()));
    }

    #[test]
    fn test_discover_collects_matching_rules() {
        let mut react = rule("React");
        react.any_keywords = vec!["react".into()];
        let mut vue = rule("Vue");
        vue.any_keywords = vec!["vue".into()];
        let mut modal = rule("Modals");
        modal.name_contains = Some("modal".into());

        let discovery =
            RuleBasedDiscovery::new(TaxonomyKind::Collection, vec![react, vue, modal]);
        let found = discovery.discover(&react_package()).unwrap();

        let names: Vec<_> = found.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Modals", "React"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let discovery =
            RuleBasedDiscovery::load(TaxonomyKind::Filter, &dir.path().join("filter.json"))
                .unwrap();
        assert!(discovery.discover(&react_package()).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("collection.json");
        std::fs::write(
            &path,
            r#"[{ "name": "React", "any_keywords": ["react"] }]"#,
        )
        .unwrap();

        let discovery = RuleBasedDiscovery::load(TaxonomyKind::Collection, &path).unwrap();
        assert_eq!(discovery.kind(), TaxonomyKind::Collection);
        let found = discovery.discover(&react_package()).unwrap();
        assert!(found.contains("React"));
    }

    #[test]
    fn test_load_rejects_malformed_rules() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("category.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(RuleBasedDiscovery::load(TaxonomyKind::Category, &path).is_err());
    }
}
