pub mod health;
pub mod recommend;
pub mod submit;
pub mod tools;

pub use health::{health_handler, ready_handler};
pub use recommend::recommend_handler;
pub use submit::submit_handler;
pub use tools::{home_handler, list_tools_handler, options_handler, tool_detail_handler};

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// All API routes. Middleware and `/metrics` are added by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/home", get(home_handler))
        .route("/api/tools", get(list_tools_handler))
        .route("/api/tools/:slug", get(tool_detail_handler))
        .route("/api/options", get(options_handler))
        .route("/api/recommend", post(recommend_handler))
        .route("/api/submissions", post(submit_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .with_state(state)
}
