use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use flightbooker_catalog::Airport;
use flightbooker_core::search::{SearchCriteria, SearchForm};
use flightbooker_core::Validate;
use flightbooker_results::SearchPrefill;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub criteria: SearchCriteria,
    /// Seeds the results screen the search hands over to.
    pub prefill: SearchPrefill,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airports", get(suggest_airports))
        .route("/v1/search", post(submit_search))
}

/// GET /v1/airports?q=
async fn suggest_airports(
    State(state): State<AppState>,
    Query(query): Query<AirportQuery>,
) -> Json<Vec<Airport>> {
    Json(state.airports.suggest(&query.q))
}

/// POST /v1/search
async fn submit_search(Json(form): Json<SearchForm>) -> Result<Json<SearchResponse>, AppError> {
    let criteria = form
        .validate()
        .map_err(|fields| AppError::ValidationError("Invalid search".to_string(), fields))?;

    tracing::info!(
        "Search {} -> {} for {} traveller(s)",
        criteria.origin,
        criteria.destination,
        criteria.traveller_count()
    );

    let prefill = SearchPrefill {
        destination: Some(criteria.destination.clone()),
        theme: None,
    };
    Ok(Json(SearchResponse { criteria, prefill }))
}
