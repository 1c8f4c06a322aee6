use async_trait::async_trait;

use crate::flight::FlightResult;
use crate::trip::Trip;
use crate::CoreResult;

/// Source of bookable flights. The results pipeline and the booking wizard
/// only see this trait, so the static list can be swapped for a backend.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn list_flights(&self) -> CoreResult<Vec<FlightResult>>;

    async fn get_flight(&self, id: &str) -> CoreResult<Option<FlightResult>> {
        let flights = self.list_flights().await?;
        Ok(flights.into_iter().find(|f| f.id == id))
    }
}

/// Source of existing bookings for retrieval and the My Trips list.
#[async_trait]
pub trait TripProvider: Send + Sync {
    async fn list_trips(&self) -> CoreResult<Vec<Trip>>;
}
