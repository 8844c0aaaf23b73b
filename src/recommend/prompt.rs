//! Prompt construction and reply validation shared by the LLM providers.

use super::llm::ProviderError;
use super::MAX_RECOMMENDATIONS;
use crate::catalog::{CatalogEntry, Tool};
use serde_json::Value;

/// System instruction for providers that take one.
pub const SYSTEM_INSTRUCTION: &str = "Return strict JSON only.";

/// Project the catalog down to the fields providers are allowed to see.
pub fn reduced_catalog(tools: &[Tool]) -> Vec<CatalogEntry<'_>> {
    tools.iter().map(CatalogEntry::from).collect()
}

const CURATOR_ROLE: &str = "You are an expert AI tools curator.";
const PICK_INSTRUCTION: &str =
    "Pick the best 3 to 5 tools for the user's task from the provided catalog.";
const SHAPE_INSTRUCTION: &str =
    "Return ONLY valid JSON with this shape: {\"slugs\": [\"tool-slug\", ...]}.";
const FORMAT_INSTRUCTION: &str = "No markdown, no extra keys.";

fn with_task_and_catalog(instructions: &str, task: &str, tools: &[Tool]) -> Result<String, ProviderError> {
    let catalog = serde_json::to_string(&reduced_catalog(tools))?;
    Ok(format!(
        "{}\n\nUser task: {}\n\nCatalog: {}",
        instructions, task, catalog
    ))
}

/// Build the user prompt: curator role and instructions one per line, then
/// the task and the reduced catalog as JSON.
pub fn build_prompt(task: &str, tools: &[Tool]) -> Result<String, ProviderError> {
    let instructions = [CURATOR_ROLE, PICK_INSTRUCTION, SHAPE_INSTRUCTION, FORMAT_INSTRUCTION].join("\n");
    with_task_and_catalog(&instructions, task, tools)
}

/// Single-paragraph variant without the curator role, for providers that
/// take the prompt as one user turn.
pub fn build_compact_prompt(task: &str, tools: &[Tool]) -> Result<String, ProviderError> {
    let instructions = [PICK_INSTRUCTION, SHAPE_INSTRUCTION, FORMAT_INSTRUCTION].join(" ");
    with_task_and_catalog(&instructions, task, tools)
}

/// Validate a completion and pull out the recommended slugs.
///
/// The completion must be a JSON object. A missing or null `slugs` field is
/// an empty answer, non-string entries are dropped, and at most five slugs
/// are kept.
pub fn parse_slugs(completion: &str) -> Result<Vec<String>, ProviderError> {
    let parsed: Value = serde_json::from_str(completion.trim())?;

    let object = parsed
        .as_object()
        .ok_or_else(|| ProviderError::Envelope("completion is not a JSON object".into()))?;

    let slugs = match object.get("slugs") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .take(MAX_RECOMMENDATIONS)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(slugs)
}
