//! GitHub host fetcher implementation.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::{HostFetcher, HostRepo, RepoId};

/// Default GitHub API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct RepoInfo {
        pub description: Option<String>,
        pub homepage: Option<String>,
        pub license: Option<License>,
        #[serde(default)]
        pub stargazers_count: u64,
    }

    #[derive(Deserialize, Debug)]
    pub struct License {
        pub name: String,
    }
}

/// Fetcher for repository metadata from the GitHub API.
pub struct GitHubFetcher {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubFetcher {
    pub fn new(http_client: HttpClient) -> Self {
        Self::with_api_url(http_client, GITHUB_API_URL)
    }

    /// Create a fetcher against a custom API URL. Used for testing and
    /// GitHub Enterprise installs.
    pub fn with_api_url(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn fetch_repo_info(&self, repo: &RepoId) -> Result<api::RepoInfo> {
        let url = format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.repo);
        debug!("Fetching repo info from {}...", url);
        self.http_client.get_json(&url).await
    }
}

#[async_trait]
impl HostFetcher for GitHubFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch_repository(&self, repo: &RepoId) -> Result<HostRepo> {
        let info = self.fetch_repo_info(repo).await?;
        Ok(HostRepo {
            description: info.description,
            homepage: info.homepage,
            license: info.license.map(|l| l.name),
            stars: info.stargazers_count,
        })
    }
}
