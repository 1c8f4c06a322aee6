use dashmap::DashMap;
use flightbooker_order::BookingWizard;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{StoreError, StoreResult};

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// A wizard shared between requests. The lock is held per mutation, never
/// across the simulated submit delay.
pub type SessionHandle = Arc<Mutex<BookingWizard>>;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// In-memory booking sessions, one per open passenger and payment screen.
/// A session untouched for longer than the idle TTL is dropped.
#[derive(Clone)]
pub struct WizardSessions {
    sessions: Arc<DashMap<Uuid, SessionEntry>>,
    idle_ttl: Duration,
}

impl Default for WizardSessions {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl WizardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_ttl,
        }
    }

    pub fn open(&self, wizard: BookingWizard) -> (Uuid, SessionHandle) {
        self.evict_expired();
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(wizard));
        self.sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!("Opened booking session {}", id);
        (id, handle)
    }

    /// Looks a session up and marks it as recently used.
    pub fn get(&self, id: &Uuid) -> StoreResult<SessionHandle> {
        if let Some(mut entry) = self.sessions.get_mut(id) {
            if entry.last_seen.elapsed() < self.idle_ttl {
                entry.last_seen = Instant::now();
                return Ok(entry.handle.clone());
            }
        }
        self.sessions
            .remove_if(id, |_, entry| entry.last_seen.elapsed() >= self.idle_ttl);
        Err(StoreError::SessionNotFound(*id))
    }

    pub fn close(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drops idle sessions and returns how many went.
    pub fn evict_expired(&self) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, entry| {
            let keep = entry.last_seen.elapsed() < self.idle_ttl;
            if !keep {
                evicted += 1;
            }
            keep
        });
        if evicted > 0 {
            tracing::debug!("Evicted {} idle booking session(s)", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightbooker_catalog::{PricingConfig, PricingEngine, StaticFlightProvider};
    use flightbooker_core::passenger::PassengerType;
    use flightbooker_core::repository::FlightProvider;

    async fn wizard() -> BookingWizard {
        let provider = StaticFlightProvider::mock().unwrap();
        let flight = provider.get_flight("FR001").await.unwrap().unwrap();
        BookingWizard::new(flight, PricingEngine::new(PricingConfig::default()))
    }

    #[tokio::test]
    async fn test_sessions_share_state() {
        let sessions = WizardSessions::new();
        let (id, handle) = sessions.open(wizard().await);

        handle.lock().await.add_passenger(PassengerType::Child).unwrap();

        let again = sessions.get(&id).unwrap();
        assert_eq!(again.lock().await.form().passengers.len(), 2);
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let sessions = WizardSessions::new();
        let (id, _) = sessions.open(wizard().await);
        assert!(sessions.close(&id));

        let err = sessions.get(&id).unwrap_err();
        assert!(matches!(err, StoreError::SessionNotFound(missing) if missing == id));
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let sessions = WizardSessions::with_ttl(Duration::from_millis(20));
        let (idle, _) = sessions.open(wizard().await);
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(sessions.get(&idle).is_err());
        assert!(sessions.is_empty());

        let (stale, _) = sessions.open(wizard().await);
        tokio::time::sleep(Duration::from_millis(40)).await;
        let (fresh, _) = sessions.open(wizard().await);
        assert_eq!(sessions.len(), 1);
        assert!(sessions.get(&stale).is_err());
        assert!(sessions.get(&fresh).is_ok());
    }

    #[tokio::test]
    async fn test_evict_expired_counts() {
        let sessions = WizardSessions::with_ttl(Duration::from_millis(20));
        sessions.open(wizard().await);
        sessions.open(wizard().await);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(sessions.evict_expired(), 2);
        assert_eq!(sessions.evict_expired(), 0);
    }
}
