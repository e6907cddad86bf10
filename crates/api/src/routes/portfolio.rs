//! Portfolio endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use intake_core::{PortfolioItem, PortfolioPayload};
use serde::Deserialize;
use telemetry::metrics;
use tracing::info;

use crate::extractors::AdminContext;
use crate::response::{ApiError, DataResponse, PortfolioListResponse, SubmitResponse};
use crate::state::AppState;

/// GET /api/portfolio - Published items with filters, search, pagination.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<store::PortfolioQuery>,
) -> Result<Json<PortfolioListResponse>, ApiError> {
    let listing = state.portfolio.list(query).await?;
    Ok(Json(listing.into()))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// GET /api/portfolio/featured - Featured published items.
pub async fn featured_handler(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<DataResponse<Vec<PortfolioItem>>>, ApiError> {
    let items = state
        .portfolio
        .featured(query.limit.unwrap_or(6).clamp(1, 50))
        .await?;
    Ok(Json(DataResponse::new(items)))
}

/// GET /api/portfolio/:slug - Single published item by slug.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<PortfolioItem>>, ApiError> {
    let item = state
        .portfolio
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Portfolio item not found"))?;
    Ok(Json(DataResponse::new(item)))
}

/// POST /api/portfolio - Admin create. The store enforces slug uniqueness;
/// a duplicate surfaces as 409.
pub async fn create_handler(
    State(state): State<AppState>,
    _admin: AdminContext,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let payload: PortfolioPayload = serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let item = payload.into_item()?;
    let slug = item.slug.clone();
    let id = state.portfolio.create(item).await?;

    metrics().portfolio_created.inc();
    info!(%id, %slug, "Created portfolio item");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse::created(id, "Portfolio item created")),
    ))
}
