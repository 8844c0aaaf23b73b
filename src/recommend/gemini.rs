//! Google Gemini generateContent provider.

use super::llm::{CompletionApi, LlmRecommender, ProviderError, TEMPERATURE};
use super::prompt::build_compact_prompt;
use crate::catalog::Tool;
use crate::config::ProviderConfig;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

pub type GeminiRecommender = LlmRecommender<Gemini>;

pub struct Gemini {
    config: ProviderConfig,
}

impl Gemini {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl CompletionApi for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    fn prompt(&self, task: &str, tools: &[Tool]) -> Result<String, ProviderError> {
        build_compact_prompt(task, tools)
    }

    // Key goes in a header rather than the query string so it never shows up
    // in logged request URLs.
    fn request(&self, client: &Client, api_key: &str, prompt: &str) -> RequestBuilder {
        client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": prompt }] }
                ],
                "generationConfig": { "temperature": TEMPERATURE }
            }))
    }

    /// `candidates[0].content.parts[0].text`
    fn completion_text<'a>(&self, body: &'a Value) -> Option<&'a str> {
        body.get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .get(0)?
            .get("text")?
            .as_str()
    }
}
