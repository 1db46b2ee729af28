//! Package entity, the dual-field override model and catalog persistence.

mod model;
mod overridable;
mod store;

pub use model::{CATALOG_URL, DailyDownloads, Package, Status, sum_downloads};
pub use overridable::{EqPolicy, Overridable};
pub use store::{JsonStore, Store};

#[cfg(test)]
pub use store::MockStore;
