//! Tool recommendation pipeline.
//!
//! A recommendation is produced by the first [`RecommendStage`] in a fixed
//! chain that answers with at least one slug:
//!
//! 1. **OpenAI** chat completions
//! 2. **Gemini** generateContent
//! 3. **Keyword ranker** (local, always answers for a non-empty catalog)
//!
//! Remote stages fail soft: any problem on their side turns into `None` and
//! the chain moves on. Returned slugs are mapped back to full catalog records
//! by the [`Recommender`].

pub mod gemini;
pub mod keyword;
pub mod llm;
pub mod openai;
pub mod orchestrator;
pub mod prompt;

use crate::catalog::Tool;
use async_trait::async_trait;

pub use gemini::{Gemini, GeminiRecommender};
pub use keyword::{rank, KeywordRanker};
pub use llm::{CompletionApi, LlmRecommender, ProviderError};
pub use openai::{OpenAi, OpenAiRecommender};
pub use orchestrator::{resolve_slugs, Recommendation, Recommender, SkipReason};

/// Upper bound on slugs any stage may return.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// One step of the recommendation fallback chain.
#[async_trait]
pub trait RecommendStage: Send + Sync {
    /// Short identifier used in logs, metrics and the response `source`.
    fn name(&self) -> &'static str;

    /// Recommend tool slugs for `task`, best first.
    ///
    /// `None` means the stage could not answer at all (not configured,
    /// unreachable, malformed reply). `Some(vec![])` means it answered with
    /// nothing. The orchestrator falls through on both.
    async fn recommend(&self, task: &str, tools: &[Tool]) -> Option<Vec<String>>;
}
