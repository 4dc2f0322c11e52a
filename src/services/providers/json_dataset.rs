use std::path::{Path, PathBuf};

use crate::{error::AppResult, services::ingest::RawReviewRecord};

use super::ReviewSource;

/// Catalog source backed by a JSON file holding an array of raw records
///
/// The file is read in full on every fetch; datasets are small enough
/// that streaming would buy nothing.
pub struct JsonDataset {
    path: PathBuf,
}

impl JsonDataset {
    /// Creates a source reading from the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ReviewSource for JsonDataset {
    async fn fetch_records(&self) -> AppResult<Vec<RawReviewRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<RawReviewRecord> = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Dataset file read"
        );

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "json_dataset"
    }
}
