use crate::error::Result;
use crate::recommend::Recommendation;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

/// Pull `task` out of a request body.
///
/// The body is read leniently: anything that is not a JSON object with a
/// string `task` yields an empty task, which the recommender reports as
/// `missing_task` instead of rejecting the request.
fn extract_task(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("task").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

/// POST /api/recommend - Recommend up to five catalog tools for a task.
///
/// # Flow
/// 1. Blank task returns `{"tools": [], "reason": "missing_task"}`
/// 2. Load the catalog snapshot
/// 3. Run the provider chain (OpenAI, Gemini, keywords)
/// 4. Return resolved tools in rank order with the trimmed task
pub async fn recommend_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Recommendation>> {
    let task = extract_task(&body);

    if task.trim().is_empty() {
        metrics::counter!("recommend_requests_total", "source" => "missing_task").increment(1);
        return Ok(Json(Recommendation::missing_task()));
    }

    let start = std::time::Instant::now();
    let tools = state.catalog.list_tools().await?;
    let recommendation = state.recommender.recommend(&task, &tools).await;
    let elapsed = start.elapsed();

    let source = recommendation.source.unwrap_or("none");
    tracing::debug!(task = %task.trim(), "Recommendation task");
    tracing::info!(
        task_chars = task.trim().chars().count(),
        source,
        returned = recommendation.tools.len(),
        catalog_size = tools.len(),
        total_ms = elapsed.as_millis() as u64,
        "Recommendation completed"
    );

    metrics::counter!("recommend_requests_total", "source" => source).increment(1);
    metrics::histogram!("recommend_latency_ms").record(elapsed.as_millis() as f64);

    Ok(Json(recommendation))
}
