//! OpenAI chat completions provider.

use super::llm::{CompletionApi, LlmRecommender, TEMPERATURE};
use super::prompt::SYSTEM_INSTRUCTION;
use crate::config::ProviderConfig;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

pub type OpenAiRecommender = LlmRecommender<OpenAi>;

pub struct OpenAi {
    config: ProviderConfig,
}

impl OpenAi {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl CompletionApi for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    fn request(&self, client: &Client, api_key: &str, prompt: &str) -> RequestBuilder {
        client.post(self.endpoint()).bearer_auth(api_key).json(&json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": prompt }
            ],
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" }
        }))
    }

    /// `choices[0].message.content`
    fn completion_text<'a>(&self, body: &'a Value) -> Option<&'a str> {
        body.get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
    }
}
