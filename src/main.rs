use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;

use curator::application::{RefreshUseCase, compose_tweet, render_details};
use curator::classify::Classifier;
use curator::fetch::{GitHubFetcher, NpmFetcher};
use curator::http::HttpClient;
use curator::package::{JsonStore, Package, Store};
use curator::taxonomy::{RuleBasedDiscovery, TaxonomyKind};
use curator::text::{DefaultStripper, DonationFinder};

/// curator - package catalog curation
///
/// Aggregates npm registry and GitHub metadata into a local catalog of
/// curated packages, classifies them into collections, filters and
/// categories, and prepares announcement tweets.
#[derive(Parser, Debug)]
#[command(author, version = env!("CURATOR_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog root directory (also via CURATOR_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "CURATOR_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub root: Option<PathBuf>,

    /// npm registry URL (defaults to https://registry.npmjs.org)
    #[arg(long = "registry-url", value_name = "URL", global = true)]
    pub registry_url: Option<String>,

    /// npm downloads API URL (defaults to https://api.npmjs.org)
    #[arg(long = "downloads-url", value_name = "URL", global = true)]
    pub downloads_url: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch or re-fetch a package's metadata from upstream
    Refresh(NameArgs),

    /// Refresh every package in the catalog
    Update,

    /// Show a stored package's details
    Show(NameArgs),

    /// Compose the announcement tweet for a package
    Tweet(NameArgs),

    /// List stored packages
    List,
}

#[derive(clap::Args, Debug)]
pub struct NameArgs {
    /// The package name as published to the registry
    #[arg(value_name = "NAME")]
    pub name: String,
}

fn catalog_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => dirs::home_dir()
            .map(|home| home.join(".curator"))
            .context("Could not determine the home directory; pass --root"),
    }
}

fn build_classifier(store: &JsonStore) -> Result<Classifier> {
    let mut classifier = Classifier::new();
    for kind in TaxonomyKind::ALL {
        let rules = RuleBasedDiscovery::load(kind, &store.rules_path(&kind.to_string()))?;
        classifier = classifier.with_discovery(Box::new(rules));
    }
    Ok(classifier)
}

fn load_required(store: &JsonStore, name: &str) -> Result<Package> {
    store
        .load(&Package::new(name).slug())?
        .with_context(|| format!("Package {} is not in the catalog. Refresh it first.", name))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let store = JsonStore::new(catalog_root(cli.root)?);
    let http_client = HttpClient::new(Client::new());
    let registry = NpmFetcher::with_urls(
        http_client.clone(),
        cli.registry_url.as_deref().unwrap_or(curator::fetch::NPM_REGISTRY_URL),
        cli.downloads_url.as_deref().unwrap_or(curator::fetch::NPM_DOWNLOADS_URL),
    );
    let host = GitHubFetcher::with_api_url(
        http_client,
        cli.api_url.as_deref().unwrap_or(curator::fetch::GITHUB_API_URL),
    );
    let classifier = build_classifier(&store)?;
    let donations = DonationFinder::new();
    let stripper = DefaultStripper::new();

    match cli.command {
        Commands::Refresh(args) => {
            let use_case = RefreshUseCase::new(&store, &registry, &host, &classifier, &donations);
            let package = use_case.refresh_one(&args.name).await?;
            print!("{}", render_details(&package, &stripper));
        }
        Commands::Update => {
            let use_case = RefreshUseCase::new(&store, &registry, &host, &classifier, &donations);
            let summary = use_case.refresh_all().await?;
            println!(
                "Refreshed {} package(s), {} failed.",
                summary.refreshed.len(),
                summary.failed.len()
            );
            if !summary.failed.is_empty() {
                anyhow::bail!("Some packages failed to refresh: {}", summary.failed.join(", "));
            }
        }
        Commands::Show(args) => {
            let package = load_required(&store, &args.name)?;
            print!("{}", render_details(&package, &stripper));
        }
        Commands::Tweet(args) => {
            let package = load_required(&store, &args.name)?;
            // A package without a description simply has nothing to announce
            if let Some(tweet) = compose_tweet(&package, &stripper) {
                println!("{}", tweet);
            }
        }
        Commands::List => {
            for package in store.find_all()? {
                println!(
                    "{:<40} {:>10} {:>8}  {}",
                    package.name, package.total_downloads, package.stars, package.status
                );
            }
        }
    }
    Ok(())
}
