//! The central catalog entity and its accessor contracts.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};

use super::overridable::Overridable;

/// Base URL of the public catalog, used to build canonical package pages.
pub const CATALOG_URL: &str = "https://js.coach";

/// Lifecycle state of a package in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Accepted,
    Published,
    Rejected,
}

impl Status {
    /// Only accepted and published packages take part in classification.
    pub fn classifiable(self) -> bool {
        matches!(self, Status::Accepted | Status::Published)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Accepted => write!(f, "accepted"),
            Status::Published => write!(f, "published"),
            Status::Rejected => write!(f, "rejected"),
        }
    }
}

/// One day of download counts from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDownloads {
    pub day: String,
    pub downloads: u64,
}

/// Sum a series of per-day download counts. An empty series sums to zero.
pub fn sum_downloads(downloads: &[DailyDownloads]) -> u64 {
    downloads.iter().map(|d| d.downloads).sum()
}

/// A package aggregated from the npm registry and its hosting repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    /// Repository slug ("owner/repo"), overridable by curators.
    #[serde(default = "Overridable::ignore_case")]
    pub repo: Overridable,
    /// Registry description, overridable by curators.
    #[serde(default = "Overridable::exact")]
    pub description: Overridable,
    /// Repository description from the hosting platform, used as a
    /// fallback when the registry description is unusable.
    pub host_description: Option<String>,
    pub readme: Option<String>,
    /// Latest version manifest as published to the registry. May carry a
    /// `deprecated` marker.
    #[serde(default)]
    pub manifest: serde_json::Value,
    /// Raw keyword list; registry documents occasionally contain nulls.
    #[serde(default)]
    pub keywords: Vec<Option<String>>,
    #[serde(default)]
    pub downloads: Vec<DailyDownloads>,
    /// Derived: always the sum of `downloads` at last save.
    #[serde(default)]
    pub total_downloads: u64,
    /// Derived: donation platform link found in the readme at last save.
    pub donation_url: Option<String>,
    pub homepage: Option<String>,
    pub license: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub status: Status,
    pub last_fetched: Option<DateTime<Utc>>,
    #[serde(default)]
    pub collections: BTreeSet<String>,
    #[serde(default)]
    pub filters: BTreeSet<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repo: Overridable::ignore_case(),
            description: Overridable::exact(),
            host_description: None,
            readme: None,
            manifest: serde_json::Value::Null,
            keywords: Vec::new(),
            downloads: Vec::new(),
            total_downloads: 0,
            donation_url: None,
            homepage: None,
            license: None,
            stars: 0,
            status: Status::default(),
            last_fetched: None,
            collections: BTreeSet::new(),
            filters: BTreeSet::new(),
            categories: BTreeSet::new(),
        }
    }

    /// Lookup slug: scoped names like `@scope/pkg` become `@scope-pkg`.
    pub fn slug(&self) -> String {
        self.name.replace('/', "-")
    }

    /// Canonical catalog page for this package.
    pub fn canonical_url(&self) -> String {
        format!("{}/{}", CATALOG_URL, self.slug())
    }

    /// Effective repository slug: curator override if set, else upstream.
    pub fn repo(&self) -> Option<&str> {
        self.repo.effective()
    }

    /// Set the repository slug as fetched from the registry. Clears any
    /// curator override when the upstream value changed; the package name
    /// may have been handed to a different project.
    pub fn set_original_repo(&mut self, value: Option<String>) {
        if let Some(old) = self.repo.set_original(value) {
            debug!("{}: repo changed upstream, dropping override {:?}", self.name, old);
        }
    }

    /// Set a curator-supplied repository slug.
    pub fn set_repo(&mut self, value: Option<String>) {
        self.repo.set_override(value);
    }

    /// Effective description: curator override if set, else upstream.
    pub fn description(&self) -> Option<&str> {
        self.description.effective()
    }

    /// Set the description as fetched from the registry. A discarded
    /// non-empty override is reported as a warning; the curated text may
    /// need rewriting against the new upstream copy.
    pub fn set_original_description(&mut self, value: Option<String>) {
        let new = value.clone();
        if let Some(old) = self.description.set_original(value)
            && !old.is_empty()
        {
            warn!(
                "The {} package, which had a custom description, has a new description.\nOld: {}\nNew: {}",
                self.name,
                old,
                new.as_deref().unwrap_or("")
            );
        }
    }

    /// Set a curator-supplied description.
    pub fn set_description(&mut self, value: Option<String>) {
        self.description.set_override(value);
    }

    pub fn repo_owner(&self) -> Option<&str> {
        self.repo().and_then(|r| r.split('/').next())
    }

    pub fn repo_name(&self) -> Option<&str> {
        self.repo().and_then(|r| r.split('/').next_back())
    }

    /// Browser URL of the hosting repository.
    pub fn host_url(&self) -> Option<String> {
        self.repo().map(|r| format!("https://github.com/{}", r))
    }

    /// Normalized keywords: nulls dropped, lower-cased, order and
    /// duplicates preserved.
    pub fn keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .flatten()
            .map(|k| k.to_lowercase())
            .collect()
    }

    /// Whether the latest published version is marked deprecated.
    pub fn deprecated(&self) -> bool {
        self.manifest
            .get("deprecated")
            .is_some_and(|v| !v.is_null())
    }
}
