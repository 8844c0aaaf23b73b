use crate::catalog::{CatalogStore, JsonCatalog};
use crate::config::Config;
use crate::error::Result;
use crate::recommend::Recommender;
use crate::submissions::{Notifier, SubmissionLog};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Nothing here is mutated per request; the catalog is re-read on every call
/// and the recommender holds no state between calls.
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub recommender: Arc<Recommender>,
    pub submissions: Arc<SubmissionLog>,
    pub notifier: Arc<Notifier>,
    /// Set once the catalog has been read successfully at startup.
    pub ready: AtomicBool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from configuration using the JSON catalog at `tools_path`.
    pub async fn new(config: Config) -> Result<Self> {
        let catalog: Arc<dyn CatalogStore> = Arc::new(JsonCatalog::new(&config.tools_path));
        Self::with_catalog(config, catalog).await
    }

    /// Build state around an existing catalog store.
    ///
    /// One HTTP client (and its connection pool) is shared by both LLM
    /// providers and the submission webhook.
    pub async fn with_catalog(config: Config, catalog: Arc<dyn CatalogStore>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("toolhub/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let recommender = Recommender::from_config(&config, client.clone());
        let notifier = Notifier::new(client, config.notify_webhook_url.clone());

        let state = Self {
            catalog,
            recommender: Arc::new(recommender),
            submissions: Arc::new(SubmissionLog::new(&config.submissions_path)),
            notifier: Arc::new(notifier),
            ready: AtomicBool::new(false),
            config: Arc::new(config),
        };

        state.check_catalog().await?;
        state.ready.store(true, Ordering::SeqCst);

        Ok(state)
    }

    /// Read the catalog once so a broken document is reported at startup
    /// rather than on the first request.
    async fn check_catalog(&self) -> Result<()> {
        let tools = self.catalog.list_tools().await?;

        if tools.is_empty() {
            tracing::warn!(
                path = %self.config.tools_path.display(),
                "Catalog is empty, recommendations will return no tools"
            );
        } else {
            tracing::info!(tools = tools.len(), "Catalog loaded");
        }

        Ok(())
    }

    /// Check if the service is ready to handle requests.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
