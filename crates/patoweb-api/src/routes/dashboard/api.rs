//! Dashboard JSON API endpoints

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::AppState;
use patoweb_core::{CategorySlice, MonthFlow, MonthlyPoint, Summary};

/// Headline figures (balance, pending total, goal progress)
pub async fn api_summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    state.ledger.refresh_if_stale().await?;
    Ok(Json(state.ledger.summary()?))
}

/// Balance-evolution series
pub async fn api_series(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyPoint>>, ApiError> {
    state.ledger.refresh_if_stale().await?;
    Ok(Json(state.ledger.monthly_series()?))
}

/// Category breakdown of inflows
pub async fn api_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategorySlice>>, ApiError> {
    state.ledger.refresh_if_stale().await?;
    Ok(Json(state.ledger.category_breakdown()?))
}

/// Per-month inflow/outflow history
pub async fn api_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthFlow>>, ApiError> {
    state.ledger.refresh_if_stale().await?;
    Ok(Json(state.ledger.monthly_history()?))
}
