//! Local keyword ranking, the last stage of the chain.
//!
//! Score = `10 × shared tokens + trending + 0.01 × popularity`. Lexical
//! overlap dominates; trending and popularity only separate tools that match
//! the task equally well.

use super::{RecommendStage, MAX_RECOMMENDATIONS};
use crate::catalog::Tool;
use async_trait::async_trait;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

const OVERLAP_WEIGHT: f64 = 10.0;
const POPULARITY_WEIGHT: f64 = 0.01;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z0-9]+").expect("token pattern is valid"));

/// Distinct lower-case alphanumeric tokens of `text`.
fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Text the ranker matches against: name, description, category, use cases, tags.
fn haystack(tool: &Tool) -> String {
    let use_cases = tool.use_cases.join(" ");
    let tags = tool.tags.join(" ");
    [
        tool.name.as_str(),
        tool.description.as_str(),
        tool.category.as_str(),
        use_cases.as_str(),
        tags.as_str(),
    ]
    .join(" ")
}

fn score(task_tokens: &HashSet<String>, tool: &Tool) -> f64 {
    let tool_tokens = tokenize(&haystack(tool));
    let overlap = task_tokens.intersection(&tool_tokens).count() as f64;
    overlap * OVERLAP_WEIGHT + tool.trending + tool.popularity * POPULARITY_WEIGHT
}

/// Rank `tools` against `task` and return up to five slugs, best first.
///
/// The sort is stable, so equally scored tools keep catalog order. The top
/// five ranked tools are taken before empty slugs are dropped.
pub fn rank(task: &str, tools: &[Tool]) -> Vec<String> {
    let task_tokens = tokenize(task);

    let mut scored: Vec<(f64, &Tool)> = tools
        .iter()
        .map(|tool| (score(&task_tokens, tool), tool))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .filter(|(_, tool)| !tool.slug.is_empty())
        .map(|(_, tool)| tool.slug.clone())
        .collect()
}

/// [`RecommendStage`] wrapper around [`rank`]. Always answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRanker;

#[async_trait]
impl RecommendStage for KeywordRanker {
    fn name(&self) -> &'static str {
        "keywords"
    }

    async fn recommend(&self, task: &str, tools: &[Tool]) -> Option<Vec<String>> {
        Some(rank(task, tools))
    }
}
