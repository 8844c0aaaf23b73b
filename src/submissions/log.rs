//! Append-only submissions log stored as one JSON array.
//!
//! Single-process, low-volume use: there is no locking between concurrent
//! appends.

use crate::error::Result;
use crate::submissions::types::Submission;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct SubmissionLog {
    path: PathBuf,
}

impl SubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored entry. Missing or unreadable JSON yields an empty log.
    pub async fn entries(&self) -> Result<Vec<Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Submissions log is not a JSON array, starting a new one"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Append `submission` and rewrite the file, creating parent directories as needed.
    ///
    /// Existing entries are kept as raw JSON so older records with a
    /// different shape survive the rewrite.
    pub async fn append(&self, submission: &Submission) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut items = self.entries().await?;
        items.push(serde_json::to_value(submission)?);

        let mut document = serde_json::to_string_pretty(&items)?;
        document.push('\n');
        tokio::fs::write(&self.path, document).await?;

        tracing::info!(
            path = %self.path.display(),
            id = %submission.id,
            total = items.len(),
            "Submission saved"
        );

        Ok(())
    }
}
