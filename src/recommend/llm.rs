//! Generic LLM-backed recommendation stage.
//!
//! [`LlmRecommender`] owns everything the providers share: the API key
//! check, prompt building, timeout, HTTP status handling and reply
//! validation. A [`CompletionApi`] only describes how to shape the request
//! and where the completion text sits in the response.

use super::prompt::{build_prompt, parse_slugs};
use super::RecommendStage;
use crate::catalog::Tool;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Sampling temperature sent to every provider.
pub const TEMPERATURE: f64 = 0.2;

/// Default bound on a single provider round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Why a provider round trip produced no answer. Never leaves the stage.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    Envelope(String),
}

/// Provider-specific request and response envelope.
pub trait CompletionApi: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Configured API key, `None` when the provider is disabled.
    fn api_key(&self) -> Option<&str>;

    /// Prompt text sent for `task`. Defaults to [`build_prompt`].
    fn prompt(&self, task: &str, tools: &[Tool]) -> Result<String, ProviderError> {
        build_prompt(task, tools)
    }

    /// Build the completion request carrying `prompt`.
    fn request(&self, client: &Client, api_key: &str, prompt: &str) -> RequestBuilder;

    /// Locate the completion text inside a decoded response body.
    fn completion_text<'a>(&self, body: &'a Value) -> Option<&'a str>;
}

pub struct LlmRecommender<A> {
    api: A,
    client: Client,
    timeout: Duration,
}

impl<A: CompletionApi> LlmRecommender<A> {
    pub fn new(api: A, client: Client) -> Self {
        Self {
            api,
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api.api_key().is_some()
    }

    async fn request_slugs(
        &self,
        api_key: &str,
        task: &str,
        tools: &[Tool],
    ) -> Result<Vec<String>, ProviderError> {
        let prompt = self.api.prompt(task, tools)?;

        let body: Value = self
            .api
            .request(&self.client, api_key, &prompt)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = self
            .api
            .completion_text(&body)
            .ok_or_else(|| ProviderError::Envelope("completion text missing".into()))?;

        parse_slugs(text)
    }
}

#[async_trait]
impl<A: CompletionApi> RecommendStage for LlmRecommender<A> {
    fn name(&self) -> &'static str {
        self.api.name()
    }

    async fn recommend(&self, task: &str, tools: &[Tool]) -> Option<Vec<String>> {
        let provider = self.api.name();

        let Some(api_key) = self.api.api_key() else {
            tracing::debug!(provider, "API key not configured, skipping provider");
            return None;
        };

        let start = std::time::Instant::now();
        match self.request_slugs(api_key, task, tools).await {
            Ok(slugs) => {
                tracing::debug!(
                    provider,
                    count = slugs.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Provider answered"
                );
                Some(slugs)
            }
            Err(e) => {
                tracing::warn!(
                    provider,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Provider recommendation failed"
                );
                metrics::counter!("provider_failures_total", "provider" => provider).increment(1);
                None
            }
        }
    }
}
