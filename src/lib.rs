//! Toolhub - AI tool marketplace service
//!
//! This library exposes the catalog, recommendation pipeline and HTTP
//! handlers, enabling integration tests and embedding in other applications.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod recommend;
pub mod state;
pub mod submissions;

// Re-export key types for convenience
pub use catalog::{CatalogStore, JsonCatalog, StaticCatalog, Tool};
pub use config::{Config, ProviderConfig};
pub use error::{AppError, Result};
pub use handlers::router;
pub use recommend::{Recommendation, RecommendStage, Recommender};
pub use state::AppState;
