use flightbooker_core::repository::TripProvider;
use flightbooker_core::retrieval::{RetrievalForm, RetrievalQuery};
use flightbooker_core::trip::Trip;
use flightbooker_core::validation::{FieldErrors, Validate};
use flightbooker_core::CoreError;
use dashmap::DashSet;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const NOT_FOUND_MESSAGE: &str = "Booking not found. Please check your details and try again.";

/// First trip whose reference matches exactly (ignoring case) and that has a
/// passenger whose name contains `last_name` (ignoring case).
pub fn find_trip<'a>(trips: &'a [Trip], query: &RetrievalQuery) -> Option<&'a Trip> {
    let reference = query.booking_reference.to_lowercase();
    let last_name = query.last_name.to_lowercase();
    trips.iter().find(|trip| {
        trip.booking_reference.to_lowercase() == reference
            && trip
                .passengers
                .iter()
                .any(|p| p.name.to_lowercase().contains(&last_name))
    })
}

/// "Find your booking" lookup with simulated remote latency.
///
/// One lookup per booking reference runs at a time: a second request for
/// the same reference while one is in flight is turned away with
/// `AlreadyPending`. Lookups for other references go ahead.
pub struct TripRetriever {
    provider: Arc<dyn TripProvider>,
    latency: Duration,
    pending: DashSet<String>,
}

impl TripRetriever {
    pub fn new(provider: Arc<dyn TripProvider>, latency: Duration) -> Self {
        Self {
            provider,
            latency,
            pending: DashSet::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_pending_for(&self, booking_reference: &str) -> bool {
        self.pending.contains(&booking_reference.to_uppercase())
    }

    pub async fn retrieve(&self, form: &RetrievalForm) -> Result<Trip, RetrievalError> {
        let query = form.validate().map_err(RetrievalError::Invalid)?;

        let _ticket = PendingTicket::acquire(&self.pending, &query.booking_reference)
            .ok_or(RetrievalError::AlreadyPending)?;
        tracing::info!("Retrieving booking {}", query.booking_reference);

        tokio::time::sleep(self.latency).await;

        let trips = self.provider.list_trips().await?;
        find_trip(&trips, &query).cloned().ok_or_else(|| {
            tracing::info!("No booking matched reference {}", query.booking_reference);
            RetrievalError::NotFound
        })
    }

    /// The signed-in list, split the way the My Trips tabs show it.
    pub async fn overview(&self) -> Result<TripsOverview, RetrievalError> {
        let trips = self.provider.list_trips().await?;
        Ok(TripsOverview::from_trips(trips))
    }
}

/// Releases the reference when dropped, including when the lookup future
/// is dropped half way.
struct PendingTicket<'a> {
    pending: &'a DashSet<String>,
    key: String,
}

impl<'a> PendingTicket<'a> {
    fn acquire(pending: &'a DashSet<String>, booking_reference: &str) -> Option<Self> {
        let key = booking_reference.to_uppercase();
        pending
            .insert(key.clone())
            .then_some(Self { pending, key })
    }
}

impl Drop for PendingTicket<'_> {
    fn drop(&mut self) {
        self.pending.remove(&self.key);
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TripsOverview {
    pub upcoming: Vec<Trip>,
    pub past: Vec<Trip>,
}

impl TripsOverview {
    pub fn from_trips(trips: Vec<Trip>) -> Self {
        let (upcoming, past) = trips.into_iter().partition(Trip::is_upcoming);
        Self { upcoming, past }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Invalid retrieval details: {0}")]
    Invalid(FieldErrors),

    #[error("Booking not found. Please check your details and try again.")]
    NotFound,

    #[error("A lookup is already in progress")]
    AlreadyPending,

    #[error(transparent)]
    Source(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightbooker_catalog::StaticTripProvider;

    fn retriever(latency: Duration) -> TripRetriever {
        TripRetriever::new(Arc::new(StaticTripProvider::mock().unwrap()), latency)
    }

    fn form(reference: &str, last_name: &str) -> RetrievalForm {
        RetrievalForm {
            booking_reference: reference.to_string(),
            last_name: last_name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_paris_trip() {
        let trip = retriever(Duration::ZERO)
            .retrieve(&form("FLBXYZ123", "Doe"))
            .await
            .unwrap();
        assert_eq!(trip.destination, "Paris (CDG)");
    }

    #[tokio::test]
    async fn test_match_ignores_case() {
        let retriever = retriever(Duration::ZERO);
        let trip = retriever.retrieve(&form("flbabc789", "smi")).await.unwrap();
        assert_eq!(trip.destination, "London (LHR)");
    }

    #[tokio::test]
    async fn test_last_name_must_belong_to_trip() {
        let err = retriever(Duration::ZERO)
            .retrieve(&form("FLBXYZ123", "Smith"))
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::NotFound));
    }

    #[tokio::test]
    async fn test_unknown_reference_is_not_found() {
        let retriever = retriever(Duration::ZERO);
        let err = retriever.retrieve(&form("NOPE0000", "Doe")).await.unwrap_err();
        assert!(matches!(err, RetrievalError::NotFound));
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);

        // Retrying with other input still works.
        assert!(retriever.retrieve(&form("FLBXYZ123", "doe")).await.is_ok());
        assert!(!retriever.is_pending());
    }

    #[tokio::test]
    async fn test_invalid_form() {
        let err = retriever(Duration::ZERO)
            .retrieve(&form("FLB", ""))
            .await
            .unwrap_err();
        match err {
            RetrievalError::Invalid(errors) => {
                assert!(errors.contains("bookingReference"));
                assert!(errors.contains("lastName"));
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_lookup_is_rejected() {
        let retriever = Arc::new(retriever(Duration::from_millis(200)));

        let first = {
            let retriever = retriever.clone();
            let details = form("FLBXYZ123", "Doe");
            tokio::spawn(async move { retriever.retrieve(&details).await })
        };
        while !retriever.is_pending_for("flbxyz123") {
            tokio::task::yield_now().await;
        }

        let second = retriever.retrieve(&form("flbxyz123", "Doe")).await;
        assert!(matches!(second, Err(RetrievalError::AlreadyPending)));

        assert!(first.await.unwrap().is_ok());
        assert!(!retriever.is_pending());
    }

    #[tokio::test]
    async fn test_other_references_are_not_blocked() {
        let retriever = Arc::new(retriever(Duration::from_millis(200)));

        let first = {
            let retriever = retriever.clone();
            let details = form("FLBXYZ123", "Doe");
            tokio::spawn(async move { retriever.retrieve(&details).await })
        };
        while !retriever.is_pending_for("FLBXYZ123") {
            tokio::task::yield_now().await;
        }

        let other = retriever.retrieve(&form("FLBABC789", "Smith")).await.unwrap();
        assert_eq!(other.destination, "London (LHR)");
        assert!(!retriever.is_pending_for("FLBABC789"));

        assert!(first.await.unwrap().is_ok());
        assert!(!retriever.is_pending());
    }

    #[tokio::test]
    async fn test_overview_partitions_trips() {
        let overview = retriever(Duration::ZERO).overview().await.unwrap();
        assert_eq!(overview.upcoming.len(), 1);
        assert_eq!(overview.past.len(), 1);
        assert_eq!(overview.past[0].booking_reference, "FLBABC789");
    }
}
