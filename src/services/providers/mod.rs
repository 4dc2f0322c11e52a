/// Catalog source abstraction
///
/// This module provides a pluggable architecture for review catalog
/// backings (a bundled JSON dataset today, a hosted document store later).
/// Each source yields raw dataset records; ingestion turns them into feed
/// reviews.
use crate::{error::AppResult, services::ingest::RawReviewRecord};

pub mod json_dataset;

pub use json_dataset::JsonDataset;

/// Trait for raw review record sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch every record the source holds
    ///
    /// Records come back unvalidated; ingestion decides what survives.
    async fn fetch_records(&self) -> AppResult<Vec<RawReviewRecord>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
