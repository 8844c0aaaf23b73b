use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for one LLM provider.
///
/// A missing key is normal and only disables that provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl ProviderConfig {
    fn from_env(prefix: &str, default_model: &str, default_base_url: &str) -> Self {
        Self {
            api_key: non_empty_var(&format!("{}_API_KEY", prefix)),
            model: non_empty_var(&format!("{}_MODEL", prefix))
                .unwrap_or_else(|| default_model.to_string()),
            base_url: non_empty_var(&format!("{}_BASE_URL", prefix))
                .unwrap_or_else(|| default_base_url.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    /// JSON array of catalog records, re-read on every request.
    pub tools_path: PathBuf,
    /// JSON array the submission log appends to.
    pub submissions_path: PathBuf,
    /// Upper bound on each provider round trip.
    pub provider_timeout_secs: u64,
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
    /// Optional endpoint that receives a JSON copy of every submission.
    pub notify_webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("./data");
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_secs: 5,
            tools_path: data_dir.join("tools.json"),
            submissions_path: data_dir.join("submissions.json"),
            provider_timeout_secs: 20,
            openai: ProviderConfig {
                api_key: None,
                model: DEFAULT_OPENAI_MODEL.to_string(),
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            },
            gemini: ProviderConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            },
            notify_webhook_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `DATA_DIR` sets where `tools.json` and `submissions.json` live;
    /// `TOOLS_PATH` and `SUBMISSIONS_PATH` override each file individually.
    /// Provider keys (`OPENAI_API_KEY`, `GEMINI_API_KEY`) are optional.
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            tools_path: non_empty_var("TOOLS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("tools.json")),
            submissions_path: non_empty_var("SUBMISSIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("submissions.json")),
            provider_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            openai: ProviderConfig::from_env("OPENAI", DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_BASE_URL),
            gemini: ProviderConfig::from_env("GEMINI", DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_BASE_URL),
            notify_webhook_url: non_empty_var("NOTIFY_WEBHOOK_URL"),
        })
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

/// Environment variable value, treating blank as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
