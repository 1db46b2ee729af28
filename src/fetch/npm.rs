//! npm registry fetcher implementation.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::{FetchError, HttpClient};
use crate::package::DailyDownloads;

use super::{RegistryFetcher, RegistryPackage, RepoId};

/// Default registry host serving package documents.
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Default host serving download statistics.
pub const NPM_DOWNLOADS_URL: &str = "https://api.npmjs.org";

/// npm registry API response types (internal).
mod api {
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize, Debug)]
    pub struct PackageDoc {
        pub name: String,
        pub description: Option<String>,
        /// Left loose on purpose: real-world documents carry arrays with
        /// nulls, bare strings, or nothing at all.
        #[serde(default)]
        pub keywords: serde_json::Value,
        pub readme: Option<String>,
        #[serde(default)]
        pub repository: serde_json::Value,
        #[serde(rename = "dist-tags", default)]
        pub dist_tags: HashMap<String, String>,
        #[serde(default)]
        pub versions: HashMap<String, serde_json::Value>,
    }

    #[derive(Deserialize, Debug)]
    pub struct DownloadsRange {
        #[serde(default)]
        pub downloads: Vec<Day>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Day {
        pub day: String,
        pub downloads: u64,
    }
}

/// Fetcher for the npm registry and its downloads API.
pub struct NpmFetcher {
    http_client: HttpClient,
    registry_url: String,
    downloads_url: String,
}

impl NpmFetcher {
    pub fn new(http_client: HttpClient) -> Self {
        Self::with_urls(http_client, NPM_REGISTRY_URL, NPM_DOWNLOADS_URL)
    }

    /// Create a fetcher against custom endpoints. Used for testing and
    /// registry mirrors.
    pub fn with_urls(http_client: HttpClient, registry_url: &str, downloads_url: &str) -> Self {
        Self {
            http_client,
            registry_url: registry_url.trim_end_matches('/').to_string(),
            downloads_url: downloads_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_doc(&self, name: &str) -> Result<api::PackageDoc> {
        let url = format!("{}/{}", self.registry_url, encode_name(name));
        debug!("Fetching package document from {}...", url);
        self.http_client.get_json(&url).await
    }

    async fn fetch_downloads(&self, name: &str) -> Result<Vec<DailyDownloads>> {
        let url = format!(
            "{}/downloads/range/last-month/{}",
            self.downloads_url,
            encode_name(name)
        );
        debug!("Fetching download counts from {}...", url);

        let range: api::DownloadsRange = match self.http_client.get_json(&url).await {
            Ok(range) => range,
            // The stats API has no data for brand-new packages; treat that
            // as an empty series rather than failing the whole refresh.
            Err(e) if matches!(e.downcast_ref::<FetchError>(), Some(FetchError::NotFound(_))) => {
                debug!("No download stats for {} yet", name);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        Ok(range
            .downloads
            .into_iter()
            .map(|d| DailyDownloads {
                day: d.day,
                downloads: d.downloads,
            })
            .collect())
    }
}

#[async_trait]
impl RegistryFetcher for NpmFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch_package(&self, name: &str) -> Result<RegistryPackage> {
        let doc = self.fetch_doc(name).await?;
        let downloads = self.fetch_downloads(name).await?;

        let manifest = doc
            .dist_tags
            .get("latest")
            .and_then(|latest| doc.versions.get(latest))
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Ok(RegistryPackage {
            name: doc.name,
            description: doc.description,
            keywords: parse_keywords(&doc.keywords),
            readme: doc.readme,
            repo: repository_url(&doc.repository).and_then(|url| parse_repo_slug(&url)),
            manifest,
            downloads,
        })
    }
}

/// Scoped names need URL encoding: `@scope/pkg` becomes `%40scope%2Fpkg`.
fn encode_name(name: &str) -> String {
    name.replace('@', "%40").replace('/', "%2F")
}

/// Extract the keyword list, preserving nulls so the entity's normalizer
/// can account for them.
fn parse_keywords(value: &serde_json::Value) -> Vec<Option<String>> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect(),
        serde_json::Value::String(s) => vec![Some(s.clone())],
        _ => Vec::new(),
    }
}

/// The `repository` field is either a bare URL string or `{type, url}`.
fn repository_url(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("url")
            .and_then(|u| u.as_str())
            .map(String::from),
        _ => None,
    }
}

/// Reduce the many shapes of repository URLs found in manifests to an
/// owner/repo pair. Only GitHub-hosted repositories are recognized.
fn parse_repo_slug(url: &str) -> Option<RepoId> {
    let url = url.trim().trim_start_matches("git+");

    let slug = if let Some(rest) = url.strip_prefix("github:") {
        rest
    } else if let Some(pos) = url.find("github.com") {
        let rest = &url[pos + "github.com".len()..];
        rest.strip_prefix(['/', ':'])?
    } else {
        return None;
    };

    let slug = slug.trim_end_matches('/').trim_end_matches(".git");
    let parts: Vec<&str> = slug.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    format!("{}/{}", parts[0], parts[1]).parse().ok()
}
