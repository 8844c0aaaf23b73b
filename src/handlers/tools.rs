//! Catalog browsing endpoints.

use crate::catalog::{self, BrowseQuery, Category, PricingType, SortOrder, Tool};
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub categories: Vec<Category>,
    pub featured: Vec<Tool>,
    pub trending: Vec<Tool>,
}

#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<Tool>,
    /// Filters as applied, after trimming and sort normalization.
    pub selected: BrowseQuery,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub categories: Vec<Category>,
    pub pricing_types: Vec<PricingType>,
    pub sort_options: Vec<SortOrder>,
}

/// GET /api/home - Featured and trending strips.
pub async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Json<HomeResponse>> {
    let tools = state.catalog.list_tools().await?;

    Ok(Json(HomeResponse {
        categories: Category::ALL.to_vec(),
        featured: catalog::featured(&tools),
        trending: catalog::trending(&tools),
    }))
}

/// GET /api/tools - Filtered and sorted catalog listing.
pub async fn list_tools_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<ToolListResponse>> {
    let (selected, sort) = query.normalized();

    let tools = state.catalog.list_tools().await?;
    let total = tools.len();
    let tools = catalog::apply_filters(tools, &selected.q, &selected.category, &selected.pricing);
    let tools = catalog::apply_sort(tools, sort);

    tracing::debug!(
        q = %selected.q,
        category = %selected.category,
        pricing = %selected.pricing,
        sort = sort.as_str(),
        total,
        matched = tools.len(),
        "Catalog browse"
    );
    metrics::counter!("catalog_queries_total").increment(1);

    Ok(Json(ToolListResponse { tools, selected }))
}

/// GET /api/tools/:slug - Single tool detail.
pub async fn tool_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Tool>> {
    state
        .catalog
        .get_tool(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("No tool with slug '{}'", slug)))
}

/// GET /api/options - Values accepted by the browse filters.
pub async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        categories: Category::ALL.to_vec(),
        pricing_types: PricingType::ALL.to_vec(),
        sort_options: SortOrder::ALL.to_vec(),
    })
}
