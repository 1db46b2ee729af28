//! Application layer - use cases that coordinate domain services.
//!
//! This layer orchestrates the flow between the CLI, the upstream
//! fetchers and the catalog store.

mod reconcile;
mod refresh;
mod show;

pub use reconcile::reconcile_and_classify;
pub use refresh::{RefreshSummary, RefreshUseCase};
pub use show::{compose_tweet, humanize_description, render_details};
