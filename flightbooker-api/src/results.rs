use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use flightbooker_core::flight::FlightResult;
use flightbooker_results::{
    FilterState, PageLink, ResultsOutcome, ResultsView, SearchPrefill, SortKey, StopBucket,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{error::AppError, state::AppState};

/// Query string of the results screen. Every field is optional; missing
/// ones fall back to the default filter.
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub destination: Option<String>,
    pub theme: Option<String>,
    /// Comma separated buckets, e.g. `0,1`. Present but empty means none.
    pub stops: Option<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl ResultsQuery {
    /// Applies the query to the view the same way the sidebar would, then
    /// moves to the requested page.
    fn apply(&self, view: &mut ResultsView, all: &[FlightResult]) -> Result<usize, AppError> {
        if let Some(stops) = &self.stops {
            let stops = stops
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse)
                .collect::<Result<BTreeSet<StopBucket>, _>>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            view.set_stops(stops);
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let (min, max) = view.filter().price_range;
            view.set_price_range(self.min_price.unwrap_or(min), self.max_price.unwrap_or(max));
        }

        if let Some(sort) = &self.sort {
            let sort_by = sort
                .parse::<SortKey>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            view.set_sort(sort_by);
        }

        Ok(view.go_to_page(all, self.page.unwrap_or(1)))
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub prefill: SearchPrefill,
    pub filter: FilterState,
    pub results: ResultsOutcome,
    pub links: Vec<PageLink>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/flight-results", get(list_results))
}

/// GET /v1/flight-results
async fn list_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, AppError> {
    let flights = state.flights.list_flights().await?;
    let mut view = ResultsView::new(state.config.results.page_size);
    let page = query.apply(&mut view, &flights)?;
    tracing::debug!("Showing results page {}", page);

    Ok(Json(ResultsResponse {
        prefill: SearchPrefill {
            destination: query.destination,
            theme: query.theme,
        },
        filter: view.filter().clone(),
        results: view.render(&flights),
        links: view.links(&flights),
    }))
}
