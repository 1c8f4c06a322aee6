use async_trait::async_trait;
use flightbooker_core::flight::FlightResult;
use flightbooker_core::repository::FlightProvider;
use flightbooker_core::CoreResult;

use crate::CatalogError;

const FLIGHT_RESULTS: &str = include_str!("../data/flight_results.json");

/// Fixed list of result cards for the JFK → LAX demo search.
pub struct StaticFlightProvider {
    flights: Vec<FlightResult>,
}

impl StaticFlightProvider {
    pub fn new(flights: Vec<FlightResult>) -> Self {
        Self { flights }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let flights = serde_json::from_str(json).map_err(|e| CatalogError::MalformedData {
            source_name: "flight results",
            message: e.to_string(),
        })?;
        let provider = Self::new(flights);
        tracing::debug!("Loaded {} static flight results", provider.flights.len());
        Ok(provider)
    }

    /// The bundled demo flights.
    pub fn mock() -> Result<Self, CatalogError> {
        Self::from_json(FLIGHT_RESULTS)
    }
}

#[async_trait]
impl FlightProvider for StaticFlightProvider {
    async fn list_flights(&self) -> CoreResult<Vec<FlightResult>> {
        Ok(self.flights.clone())
    }

    async fn get_flight(&self, id: &str) -> CoreResult<Option<FlightResult>> {
        Ok(self.flights.iter().find(|f| f.id == id).cloned())
    }
}
