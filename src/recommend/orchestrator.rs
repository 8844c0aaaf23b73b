//! Runs the recommendation chain and resolves slugs to catalog records.

use super::{GeminiRecommender, KeywordRanker, OpenAiRecommender, RecommendStage};
use super::{Gemini, OpenAi};
use crate::catalog::Tool;
use crate::config::Config;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Why a recommendation was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTask,
}

/// Outcome of one recommendation call.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Resolved tools in the winning stage's order.
    pub tools: Vec<Tool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,

    /// Name of the stage that produced `tools`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
}

impl Recommendation {
    pub fn missing_task() -> Self {
        Self {
            tools: Vec::new(),
            task: None,
            reason: Some(SkipReason::MissingTask),
            source: None,
        }
    }
}

/// Ordered chain of recommendation stages.
pub struct Recommender {
    stages: Vec<Arc<dyn RecommendStage>>,
}

impl Recommender {
    pub fn new(stages: Vec<Arc<dyn RecommendStage>>) -> Self {
        Self { stages }
    }

    /// OpenAI, then Gemini, then the keyword ranker.
    pub fn from_config(config: &Config, client: Client) -> Self {
        let timeout = config.provider_timeout();

        let openai = OpenAiRecommender::new(OpenAi::new(config.openai.clone()), client.clone())
            .with_timeout(timeout);
        let gemini =
            GeminiRecommender::new(Gemini::new(config.gemini.clone()), client).with_timeout(timeout);

        tracing::info!(
            openai = openai.is_configured(),
            gemini = gemini.is_configured(),
            timeout_secs = timeout.as_secs(),
            "Recommendation providers configured"
        );

        let stages: Vec<Arc<dyn RecommendStage>> =
            vec![Arc::new(openai), Arc::new(gemini), Arc::new(KeywordRanker)];
        Self::new(stages)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Recommend tools for `task` from `tools`.
    ///
    /// A blank task short-circuits with [`SkipReason::MissingTask`] before any
    /// stage runs. Otherwise stages are tried in order and the first non-empty
    /// answer wins; a stage answering with no slugs is treated the same as a
    /// stage that failed.
    pub async fn recommend(&self, task: &str, tools: &[Tool]) -> Recommendation {
        let task = task.trim();
        if task.is_empty() {
            return Recommendation::missing_task();
        }

        let mut winner = None;
        for stage in &self.stages {
            match stage.recommend(task, tools).await {
                Some(slugs) if !slugs.is_empty() => {
                    winner = Some((stage.name(), slugs));
                    break;
                }
                Some(_) => tracing::debug!(stage = stage.name(), "Stage returned no slugs"),
                None => tracing::debug!(stage = stage.name(), "Stage unavailable"),
            }
        }

        let (source, resolved) = match winner {
            Some((name, slugs)) => (Some(name), resolve_slugs(&slugs, tools)),
            None => (None, Vec::new()),
        };

        Recommendation {
            tools: resolved,
            task: Some(task.to_string()),
            reason: None,
            source,
        }
    }
}

/// Map slugs to catalog records, keeping slug order and dropping unknown slugs.
pub fn resolve_slugs(slugs: &[String], tools: &[Tool]) -> Vec<Tool> {
    let by_slug: HashMap<&str, &Tool> = tools.iter().map(|t| (t.slug.as_str(), t)).collect();

    slugs
        .iter()
        .filter_map(|slug| {
            let found = by_slug.get(slug.as_str());
            if found.is_none() {
                tracing::debug!(slug = %slug, "Dropping slug not present in catalog");
            }
            found.map(|tool| (*tool).clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::rank;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stage with a canned answer that counts how often it was asked.
    struct FixedStage {
        name: &'static str,
        answer: Option<Vec<String>>,
        calls: AtomicUsize,
    }

    impl FixedStage {
        fn new(name: &'static str, answer: Option<Vec<&str>>) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: answer.map(|a| a.iter().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecommendStage for FixedStage {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn recommend(&self, _task: &str, _tools: &[Tool]) -> Option<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn catalog() -> Vec<Tool> {
        serde_json::from_value(json!([
            {
                "slug": "devbot", "name": "DevBot", "description": "AI pair programmer",
                "category": "Coding & Development", "pricing_type": "Paid",
                "tags": ["coding"], "trending": 90
            },
            {
                "slug": "copyai", "name": "Copy.ai",
                "description": "Write marketing copy for your startup",
                "category": "Marketing & Social Media", "pricing_type": "Freemium",
                "tags": ["marketing", "copywriting"], "trending": 50
            },
            {
                "slug": "clipper", "name": "Clipper", "description": "Video editing",
                "category": "Video & Audio", "pricing_type": "Free",
                "tags": ["video"], "trending": 10
            }
        ]))
        .unwrap()
    }

    fn slugs(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.slug.as_str()).collect()
    }

    fn chain(stages: &[&Arc<FixedStage>]) -> Recommender {
        Recommender::new(
            stages
                .iter()
                .map(|s| Arc::clone(*s) as Arc<dyn RecommendStage>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_blank_task_invokes_nothing() {
        let a = FixedStage::new("a", Some(vec!["devbot"]));
        let recommender = chain(&[&a]);

        for task in ["", "   ", "\n\t"] {
            let result = recommender.recommend(task, &catalog()).await;
            assert!(result.tools.is_empty());
            assert_eq!(result.reason, Some(SkipReason::MissingTask));
            assert!(result.task.is_none());
        }
        assert_eq!(a.calls(), 0);
    }

    #[tokio::test]
    async fn test_first_provider_wins_verbatim() {
        let a = FixedStage::new("a", Some(vec!["clipper", "devbot"]));
        let b = FixedStage::new("b", Some(vec!["copyai"]));
        let recommender = chain(&[&a, &b]);

        let result = recommender.recommend("  edit my video  ", &catalog()).await;

        assert_eq!(slugs(&result.tools), vec!["clipper", "devbot"]);
        assert_eq!(result.source, Some("a"));
        assert_eq!(result.task.as_deref(), Some("edit my video"));
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_and_empty_stages_fall_through() {
        let a = FixedStage::new("a", None);
        let b = FixedStage::new("b", Some(vec![]));
        let c = FixedStage::new("c", Some(vec!["copyai"]));
        let recommender = chain(&[&a, &b, &c]);

        let result = recommender.recommend("ads", &catalog()).await;

        assert_eq!(slugs(&result.tools), vec!["copyai"]);
        assert_eq!(result.source, Some("c"));
        assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_ghost_slug_resolves_to_nothing() {
        let a = FixedStage::new("a", Some(vec!["ghost-tool"]));
        let recommender = chain(&[&a]);

        let result = recommender.recommend("anything", &catalog()).await;

        assert!(result.tools.is_empty());
        assert_eq!(result.source, Some("a"));
        assert!(result.reason.is_none());
    }

    #[tokio::test]
    async fn test_unknown_slugs_dropped_order_kept() {
        let a = FixedStage::new("a", Some(vec!["copyai", "ghost", "devbot"]));
        let result = chain(&[&a]).recommend("x", &catalog()).await;
        assert_eq!(slugs(&result.tools), vec!["copyai", "devbot"]);
    }

    #[tokio::test]
    async fn test_degrades_to_keyword_ranker() {
        let a = FixedStage::new("openai", None);
        let b = FixedStage::new("gemini", None);
        let stages: Vec<Arc<dyn RecommendStage>> = vec![
            a as Arc<dyn RecommendStage>,
            b,
            Arc::new(KeywordRanker),
        ];
        let recommender = Recommender::new(stages);

        let task = "write marketing copy for my startup";
        let tools = catalog();
        let result = recommender.recommend(task, &tools).await;

        let expected = resolve_slugs(&rank(task, &tools), &tools);
        assert_eq!(result.tools, expected);
        assert_eq!(result.source, Some("keywords"));
        assert_eq!(slugs(&result.tools)[0], "copyai");
    }

    #[tokio::test]
    async fn test_nothing_answers_on_empty_catalog() {
        let recommender = Recommender::new(vec![Arc::new(KeywordRanker)]);
        let result = recommender.recommend("anything", &[]).await;

        assert!(result.tools.is_empty());
        assert!(result.source.is_none());
        assert_eq!(result.task.as_deref(), Some("anything"));
    }

    #[test]
    fn test_missing_task_serializes_reason_only() {
        let value = serde_json::to_value(Recommendation::missing_task()).unwrap();
        assert_eq!(value, json!({ "tools": [], "reason": "missing_task" }));
    }

    #[test]
    fn test_from_config_stage_order() {
        let recommender = Recommender::from_config(&Config::default(), Client::new());
        assert_eq!(recommender.stage_names(), vec!["openai", "gemini", "keywords"]);
    }
}
