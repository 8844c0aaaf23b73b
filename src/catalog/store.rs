//! Catalog loading from the flat JSON document.
//!
//! The document is a JSON array of tool records. Records that fail to parse
//! are logged and skipped so one bad entry never takes the catalog down.

use crate::catalog::types::Tool;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read path over the tool catalog.
///
/// Implementations return a snapshot; callers treat it as valid for the
/// duration of one request.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<Tool>>;

    /// Look up a single tool by slug.
    async fn get_tool(&self, slug: &str) -> Result<Option<Tool>> {
        let tools = self.list_tools().await?;
        Ok(tools.into_iter().find(|t| t.slug == slug))
    }
}

/// Catalog backed by a JSON file, re-read on every call so edits to the file
/// show up without a restart.
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for JsonCatalog {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Catalog file does not exist");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::StorageError(format!(
                    "Failed to read catalog {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let document: Value = serde_json::from_slice(&bytes)?;
        parse_catalog(&document)
    }
}

/// In-memory catalog, used when the records are already at hand.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tools: Vec<Tool>,
}

impl StaticCatalog {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl CatalogStore for StaticCatalog {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        Ok(self.tools.clone())
    }
}

/// Turn a catalog document into tool records (partial success model).
pub fn parse_catalog(document: &Value) -> Result<Vec<Tool>> {
    let records = document.as_array().ok_or_else(|| {
        AppError::StorageError("Expected catalog document to be a JSON array".into())
    })?;

    let mut tools = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        match serde_json::from_value::<Tool>(record.clone()) {
            Ok(tool) => tools.push(tool),
            Err(e) => {
                let slug = record.get("slug").and_then(Value::as_str).unwrap_or("");
                tracing::warn!(
                    index = idx,
                    slug,
                    error = %e,
                    "Skipping malformed catalog record"
                );
            }
        }
    }

    tracing::debug!(total = records.len(), parsed = tools.len(), "Catalog parsed");

    Ok(tools)
}
