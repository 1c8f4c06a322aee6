use flightbooker_catalog::{
    AirportDirectory, CatalogError, PricingConfig, PricingEngine, StaticFlightProvider,
    StaticTripProvider,
};
use flightbooker_core::repository::FlightProvider;
use flightbooker_order::TripRetriever;
use flightbooker_store::{Config, HandoffStore, WizardSessions};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightProvider>,
    pub airports: Arc<AirportDirectory>,
    pub retriever: Arc<TripRetriever>,
    pub pricing: PricingEngine,
    pub sessions: WizardSessions,
    pub handoffs: HandoffStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by the bundled static flights, trips and airports.
    pub fn with_mock_data(config: Config) -> Result<Self, CatalogError> {
        let trips = Arc::new(StaticTripProvider::mock()?);
        let pricing = PricingEngine::new(PricingConfig {
            extra_baggage: config.pricing.extra_baggage,
            travel_insurance: config.pricing.travel_insurance,
        });

        Ok(Self {
            flights: Arc::new(StaticFlightProvider::mock()?),
            airports: Arc::new(AirportDirectory::mock()?),
            retriever: Arc::new(TripRetriever::new(trips, config.retrieval.delay())),
            pricing,
            sessions: WizardSessions::with_ttl(config.booking.session_ttl()),
            handoffs: HandoffStore::with_ttl(config.booking.handoff_ttl()),
            config: Arc::new(config),
        })
    }

    /// Sweeps idle sessions and unread handoffs on a fixed period. Lookups
    /// already skip expired entries; this only reclaims the memory.
    pub fn spawn_eviction(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let sessions = self.sessions.clone();
        let handoffs = self.handoffs.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = sessions.evict_expired() + handoffs.evict_expired();
                if evicted > 0 {
                    tracing::info!("Evicted {} expired booking entries", evicted);
                }
            }
        })
    }
}
