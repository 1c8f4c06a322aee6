use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use flightbooker_order::ConfirmationView;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/booking-confirmation", get(confirmation_without_token))
        .route("/v1/booking-confirmation/{token}", get(get_confirmation))
}

/// GET /v1/booking-confirmation/{token}
///
/// The token is consumed on first read; reloading lands on the error panel.
async fn get_confirmation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ConfirmationView>, AppError> {
    let handoff = Uuid::parse_str(&token)
        .ok()
        .and_then(|token| state.handoffs.take(&token));
    let view = ConfirmationView::load(handoff).map_err(AppError::MissingState)?;

    tracing::info!("Confirmed booking {}", view.booking_reference);
    Ok(Json(view))
}

/// Direct visit with nothing handed over.
async fn confirmation_without_token() -> Result<Json<ConfirmationView>, AppError> {
    let view = ConfirmationView::load(None).map_err(AppError::MissingState)?;
    Ok(Json(view))
}
