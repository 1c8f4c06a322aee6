use async_trait::async_trait;
use flightbooker_core::repository::TripProvider;
use flightbooker_core::trip::Trip;
use flightbooker_core::CoreResult;

use crate::CatalogError;

const TRIPS: &str = include_str!("../data/trips.json");

pub struct StaticTripProvider {
    trips: Vec<Trip>,
}

impl StaticTripProvider {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let trips = serde_json::from_str(json).map_err(|e| CatalogError::MalformedData {
            source_name: "trips",
            message: e.to_string(),
        })?;
        let provider = Self::new(trips);
        tracing::debug!("Loaded {} static trips", provider.trips.len());
        Ok(provider)
    }

    pub fn mock() -> Result<Self, CatalogError> {
        Self::from_json(TRIPS)
    }
}

#[async_trait]
impl TripProvider for StaticTripProvider {
    async fn list_trips(&self) -> CoreResult<Vec<Trip>> {
        Ok(self.trips.clone())
    }
}
