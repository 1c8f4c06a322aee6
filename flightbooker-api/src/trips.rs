use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use flightbooker_core::retrieval::RetrievalForm;
use flightbooker_core::trip::Trip;
use flightbooker_order::TripsOverview;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/my-trips", get(list_trips))
        .route("/v1/my-trips/retrieve", post(retrieve_trip))
}

/// GET /v1/my-trips
async fn list_trips(State(state): State<AppState>) -> Result<Json<TripsOverview>, AppError> {
    let overview = state
        .retriever
        .overview()
        .await
        .map_err(AppError::from_retrieval)?;
    Ok(Json(overview))
}

/// POST /v1/my-trips/retrieve
///
/// Not found is an ordinary answer: the caller shows the banner and may retry.
async fn retrieve_trip(
    State(state): State<AppState>,
    Json(form): Json<RetrievalForm>,
) -> Result<Json<Trip>, AppError> {
    let trip = state
        .retriever
        .retrieve(&form)
        .await
        .map_err(AppError::from_retrieval)?;
    Ok(Json(trip))
}
