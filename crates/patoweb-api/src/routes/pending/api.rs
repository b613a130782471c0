//! Pending-dues JSON API

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::AppState;
use patoweb_core::DebtorCard;

/// Pending receivables, in original table order with board columns assigned
pub async fn api_pending(State(state): State<AppState>) -> Result<Json<Vec<DebtorCard>>, ApiError> {
    state.ledger.refresh_if_stale().await?;
    Ok(Json(state.ledger.debtor_board()?))
}
