//! Refresh use case - re-aggregates package metadata from upstream.
//!
//! A refresh pulls the registry document and, when a repository is known,
//! the hosting platform's metadata, then reconciles derived fields and
//! classification before saving.

use anyhow::{Context, Result};
use chrono::Utc;
use futures_util::StreamExt;
use log::{info, warn};

use crate::classify::Classifier;
use crate::fetch::{HostFetcher, RegistryFetcher, RepoId};
use crate::package::{Package, Store};
use crate::text::DonationFinder;

use super::reconcile::reconcile_and_classify;

/// How many packages are refreshed concurrently during a full update.
const CONCURRENT_REFRESHES: usize = 4;

/// Outcome of refreshing the whole catalog.
#[derive(Debug, Default)]
pub struct RefreshSummary {
    pub refreshed: Vec<String>,
    pub failed: Vec<String>,
}

/// Refresh use case - fetches, reconciles and persists packages.
pub struct RefreshUseCase<'a> {
    store: &'a dyn Store,
    registry: &'a dyn RegistryFetcher,
    host: &'a dyn HostFetcher,
    classifier: &'a Classifier,
    donations: &'a DonationFinder,
}

impl<'a> RefreshUseCase<'a> {
    pub fn new(
        store: &'a dyn Store,
        registry: &'a dyn RegistryFetcher,
        host: &'a dyn HostFetcher,
        classifier: &'a Classifier,
        donations: &'a DonationFinder,
    ) -> Self {
        Self {
            store,
            registry,
            host,
            classifier,
            donations,
        }
    }

    /// Refresh a single package by name, creating it when not yet stored.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_one(&self, name: &str) -> Result<Package> {
        let slug = Package::new(name).slug();
        let prior = self.store.load(&slug)?;
        let mut package = prior.clone().unwrap_or_else(|| Package::new(name));

        self.fetch_into(&mut package)
            .await
            .with_context(|| format!("Failed to refresh {}", name))?;
        reconcile_and_classify(&mut package, prior.as_ref(), self.classifier, self.donations)?;
        self.store.save(&package)?;

        info!("Refreshed {}", package.name);
        Ok(package)
    }

    /// Refresh every stored package. Individual failures are logged and
    /// counted; they never abort the rest of the run.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_all(&self) -> Result<RefreshSummary> {
        let names: Vec<String> = self
            .store
            .find_all()?
            .into_iter()
            .map(|p| p.name)
            .collect();

        let mut results = futures_util::stream::iter(names)
            .map(|name| async move { (name.clone(), self.refresh_one(&name).await) })
            .buffer_unordered(CONCURRENT_REFRESHES);

        let mut summary = RefreshSummary::default();
        while let Some((name, result)) = results.next().await {
            match result {
                Ok(_) => summary.refreshed.push(name),
                Err(e) => {
                    warn!("Skipping {}: {:#}", name, e);
                    summary.failed.push(name);
                }
            }
        }

        summary.refreshed.sort();
        summary.failed.sort();
        Ok(summary)
    }

    /// Pull upstream metadata into the package.
    ///
    /// The registry document updates the dual-tracked description and repo
    /// fields through their setters, so curator overrides are honored or
    /// discarded per their policies. Fetch errors propagate unmodified.
    async fn fetch_into(&self, package: &mut Package) -> Result<()> {
        let doc = self.registry.fetch_package(&package.name).await?;

        package.set_original_description(doc.description);
        package.set_original_repo(doc.repo.map(|r| r.to_string()));
        package.readme = doc.readme;
        package.keywords = doc.keywords;
        package.manifest = doc.manifest;
        package.downloads = doc.downloads;

        // The effective repo (curator override first) decides which
        // repository the host metadata comes from
        if let Some(slug) = package.repo()
            && let Ok(repo_id) = slug.parse::<RepoId>()
        {
            let repo = self.host.fetch_repository(&repo_id).await?;
            package.host_description = repo.description;
            package.homepage = repo.homepage;
            package.license = repo.license;
            package.stars = repo.stars;
        }

        package.last_fetched = Some(Utc::now());
        Ok(())
    }
}
