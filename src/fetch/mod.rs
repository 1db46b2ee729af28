//! Upstream fetcher abstractions.
//!
//! This module provides the collaborator contracts for the two metadata
//! sources a package is aggregated from: the package registry (npm) and the
//! source-hosting platform (GitHub).

mod github;
mod npm;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub use github::{GITHUB_API_URL, GitHubFetcher};
pub use npm::{NPM_DOWNLOADS_URL, NPM_REGISTRY_URL, NpmFetcher};

use crate::package::DailyDownloads;

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// Package metadata as published to the registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryPackage {
    pub name: String,
    pub description: Option<String>,
    /// Raw keyword list; bad documents occasionally contain nulls.
    pub keywords: Vec<Option<String>>,
    pub readme: Option<String>,
    /// Repository advertised in the manifest, if it points at a known host.
    pub repo: Option<RepoId>,
    /// Manifest of the latest published version.
    pub manifest: serde_json::Value,
    /// Per-day download counts for the trailing month.
    pub downloads: Vec<DailyDownloads>,
}

/// Repository metadata from the hosting platform.
#[derive(Debug, Clone, Default)]
pub struct HostRepo {
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub license: Option<String>,
    pub stars: u64,
}

/// Fetches package metadata from a package registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryFetcher: Send + Sync {
    async fn fetch_package(&self, name: &str) -> Result<RegistryPackage>;
}

/// Fetches repository metadata from a source-hosting platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostFetcher: Send + Sync {
    async fn fetch_repository(&self, repo: &RepoId) -> Result<HostRepo>;
}
