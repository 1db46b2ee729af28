//! Catalog persistence: one JSON document per package slug.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Package;

/// Entity store consumed by the orchestration layer.
///
/// Uniqueness on name/slug is enforced by the slug-keyed layout: two
/// packages whose names collapse to the same slug map to the same document.
#[cfg_attr(test, mockall::automock)]
pub trait Store: Send + Sync {
    /// Load a package by slug. Returns `None` when not stored.
    fn load(&self, slug: &str) -> Result<Option<Package>>;

    /// Persist a package under its slug.
    fn save(&self, package: &Package) -> Result<()>;

    /// Load every stored package. Unreadable documents are skipped with a
    /// warning rather than failing the whole scan.
    fn find_all(&self) -> Result<Vec<Package>>;
}

/// File-backed store rooted at a catalog directory.
///
/// Layout: `<root>/packages/<slug>.json`, `<root>/taxonomy/<kind>.json`.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn packages_dir(&self) -> PathBuf {
        self.root.join("packages")
    }

    /// Document path for a package slug.
    pub fn package_path(&self, slug: &str) -> PathBuf {
        self.packages_dir().join(format!("{}.json", slug))
    }

    /// Rules file for a taxonomy kind (e.g. `<root>/taxonomy/collection.json`).
    pub fn rules_path(&self, kind: &str) -> PathBuf {
        self.root.join("taxonomy").join(format!("{}.json", kind))
    }
}

impl Store for JsonStore {
    #[tracing::instrument(skip(self))]
    fn load(&self, slug: &str) -> Result<Option<Package>> {
        let path = self.package_path(slug);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let package = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(Some(package))
    }

    fn save(&self, package: &Package) -> Result<()> {
        let path = self.package_path(&package.slug());
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(package)?;
        std::fs::write(&path, content).with_context(|| format!("Failed to save {:?}", path))
    }

    fn find_all(&self) -> Result<Vec<Package>> {
        let dir = self.packages_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut packages = Vec::new();
        for entry in std::fs::read_dir(&dir).with_context(|| format!("Failed to read {:?}", dir))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|content| serde_json::from_str::<Package>(&content).map_err(Into::into))
            {
                Ok(package) => packages.push(package),
                Err(e) => {
                    log::warn!("Failed to load package from {:?}: {}", path, e);
                }
            }
        }

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(packages)
    }
}
