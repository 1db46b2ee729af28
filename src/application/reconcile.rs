//! Reconciliation of derived package fields.
//!
//! Derived fields are recomputed only when the field they derive from
//! actually changed since the previous stored state, then classification
//! runs over the final attributes.

use anyhow::Result;

use crate::classify::Classifier;
use crate::package::{Package, sum_downloads};
use crate::text::DonationFinder;

/// Recompute derived fields and classify the package.
///
/// `prior` is the previously stored state, `None` for a brand-new package
/// (every derived field is then recomputed).
pub fn reconcile_and_classify(
    package: &mut Package,
    prior: Option<&Package>,
    classifier: &Classifier,
    donations: &DonationFinder,
) -> Result<()> {
    let downloads_changed = prior.is_none_or(|p| p.downloads != package.downloads);
    if downloads_changed {
        package.total_downloads = sum_downloads(&package.downloads);
    }

    let readme_changed = prior.is_none_or(|p| p.readme != package.readme);
    if readme_changed {
        package.donation_url = package
            .readme
            .as_deref()
            .and_then(|readme| donations.find_link(readme));
    }

    classifier.classify(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::DailyDownloads;

    fn downloads(counts: &[u64]) -> Vec<DailyDownloads> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &downloads)| DailyDownloads {
                day: format!("2016-01-{:02}", i + 1),
                downloads,
            })
            .collect()
    }

    fn reconcile(package: &mut Package, prior: Option<&Package>) {
        reconcile_and_classify(package, prior, &Classifier::new(), &DonationFinder::new())
            .unwrap();
    }

    #[test]
    fn test_new_package_computes_all_derived_fields() {
        let mut package = Package::new("example");
        package.downloads = downloads(&[10, 32]);
        package.readme = Some("Donate: https://ko-fi.com/dev".into());

        reconcile(&mut package, None);

        assert_eq!(package.total_downloads, 42);
        assert_eq!(package.donation_url.as_deref(), Some("https://ko-fi.com/dev"));
    }

    #[test]
    fn test_unchanged_fields_are_not_recomputed() {
        let mut prior = Package::new("example");
        prior.downloads = downloads(&[10]);
        prior.readme = Some("no links".into());
        // Stale derived values stand in for an expensive recompute
        prior.total_downloads = 999;
        prior.donation_url = Some("https://ko-fi.com/old".into());

        let mut package = prior.clone();
        reconcile(&mut package, Some(&prior));

        assert_eq!(package.total_downloads, 999);
        assert_eq!(package.donation_url.as_deref(), Some("https://ko-fi.com/old"));
    }

    #[test]
    fn test_changed_downloads_recompute_total() {
        let mut prior = Package::new("example");
        prior.downloads = downloads(&[10]);
        prior.total_downloads = 10;

        let mut package = prior.clone();
        package.downloads = downloads(&[10, 5]);
        reconcile(&mut package, Some(&prior));

        assert_eq!(package.total_downloads, 15);
    }

    #[test]
    fn test_changed_readme_recomputes_donation_link() {
        let mut prior = Package::new("example");
        prior.readme = Some("old".into());
        prior.donation_url = Some("https://ko-fi.com/old".into());

        let mut package = prior.clone();
        package.readme = Some("now on https://opencollective.com/new".into());
        reconcile(&mut package, Some(&prior));
        assert_eq!(
            package.donation_url.as_deref(),
            Some("https://opencollective.com/new")
        );

        // A readme losing its link clears the derived field
        let mut package = prior.clone();
        package.readme = None;
        reconcile(&mut package, Some(&prior));
        assert_eq!(package.donation_url, None);
    }
}
