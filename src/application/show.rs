//! Show action - renders stored package details.

use std::fmt::Write;

use crate::package::Package;
use crate::text::{MarkupStripper, TweetComposer, humanize};

/// Humanize a package's description, falling back to the repository
/// description when the registry one is unusable.
pub fn humanize_description(package: &Package, stripper: &dyn MarkupStripper) -> String {
    humanize(
        package.description(),
        package.host_description.as_deref(),
        stripper,
    )
}

/// Render a package's details for terminal display.
pub fn render_details(package: &Package, stripper: &dyn MarkupStripper) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:        {}", package.name);
    let _ = writeln!(out, "Status:      {}", package.status);
    let _ = writeln!(
        out,
        "Description: {}",
        humanize_description(package, stripper)
    );
    if let Some(repo) = package.repo() {
        let _ = writeln!(out, "Repository:  https://github.com/{}", repo);
    }
    if let Some(homepage) = &package.homepage {
        let _ = writeln!(out, "Homepage:    {}", homepage);
    }
    if let Some(license) = &package.license {
        let _ = writeln!(out, "License:     {}", license);
    }
    let _ = writeln!(out, "Stars:       {}", package.stars);
    let _ = writeln!(out, "Downloads:   {} (last month)", package.total_downloads);
    if let Some(donation) = &package.donation_url {
        let _ = writeln!(out, "Donate:      {}", donation);
    }
    if package.deprecated() {
        let _ = writeln!(out, "Deprecated:  yes");
    }
    let keywords = package.keywords();
    if !keywords.is_empty() {
        let _ = writeln!(out, "Keywords:    {}", keywords.join(", "));
    }
    for (label, members) in [
        ("Collections", &package.collections),
        ("Filters", &package.filters),
        ("Categories", &package.categories),
    ] {
        if !members.is_empty() {
            let names: Vec<_> = members.iter().map(String::as_str).collect();
            let _ = writeln!(out, "{:<12} {}", format!("{}:", label), names.join(", "));
        }
    }
    if let Some(fetched) = package.last_fetched {
        let _ = writeln!(out, "Fetched:     {}", fetched.to_rfc3339());
    }
    out
}

/// Compose the announcement tweet for a package.
///
/// The effective description is reduced to plain text first; a package
/// without one gets no tweet.
pub fn compose_tweet(package: &Package, stripper: &dyn MarkupStripper) -> Option<String> {
    let description = package.description().map(|d| stripper.to_plain_text(d));
    TweetComposer::default().compose(
        &package.name,
        description.as_deref(),
        &package.canonical_url(),
    )
}
