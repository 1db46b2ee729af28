//! Classification engine: merges discovered taxonomy membership into a
//! package.

use anyhow::Result;
use log::debug;

use crate::package::Package;
use crate::taxonomy::{Discovery, TaxonomyKind};

/// Runs the per-taxonomy discovery rules and unions their results into the
/// package's membership sets.
///
/// Discovery only ever adds members; existing membership (manual or from a
/// previous run) is never removed. Running the engine twice on an unchanged
/// package yields the same final membership.
pub struct Classifier {
    discoveries: Vec<Box<dyn Discovery>>,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            discoveries: Vec::new(),
        }
    }

    pub fn with_discovery(mut self, discovery: Box<dyn Discovery>) -> Self {
        self.discoveries.push(discovery);
        self
    }

    /// Classify a package, merging discovered membership.
    ///
    /// Only accepted and published packages are classified; for any other
    /// status this is a no-op. Discovery failures propagate unmasked.
    #[tracing::instrument(skip(self, package), fields(package = %package.name))]
    pub fn classify(&self, package: &mut Package) -> Result<()> {
        if !package.status.classifiable() {
            debug!(
                "Skipping classification of {} (status: {})",
                package.name, package.status
            );
            return Ok(());
        }

        for discovery in &self.discoveries {
            let found = discovery.discover(package)?;
            let members = match discovery.kind() {
                TaxonomyKind::Collection => &mut package.collections,
                TaxonomyKind::Filter => &mut package.filters,
                TaxonomyKind::Category => &mut package.categories,
            };
            members.extend(found);
        }

        Ok(())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
