use dashmap::DashMap;
use flightbooker_order::ConfirmationHandoff;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_HANDOFF_TTL: Duration = Duration::from_secs(300);

struct StoredHandoff {
    handoff: ConfirmationHandoff,
    stored_at: Instant,
}

/// Navigation state passed from a completed booking to the confirmation
/// screen. Each token can be read exactly once, so a refresh or a direct
/// visit finds nothing. Tokens nobody reads expire after `ttl`.
#[derive(Clone)]
pub struct HandoffStore {
    entries: Arc<DashMap<Uuid, StoredHandoff>>,
    ttl: Duration,
}

impl Default for HandoffStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_HANDOFF_TTL)
    }
}

impl HandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn put(&self, handoff: ConfirmationHandoff) -> Uuid {
        self.evict_expired();
        let token = Uuid::new_v4();
        self.entries.insert(
            token,
            StoredHandoff {
                handoff,
                stored_at: Instant::now(),
            },
        );
        token
    }

    pub fn take(&self, token: &Uuid) -> Option<ConfirmationHandoff> {
        self.entries
            .remove(token)
            .filter(|(_, stored)| stored.stored_at.elapsed() < self.ttl)
            .map(|(_, stored)| stored.handoff)
    }

    /// Drops handoffs older than the TTL and returns how many went.
    pub fn evict_expired(&self) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, stored| {
            let keep = stored.stored_at.elapsed() < self.ttl;
            if !keep {
                evicted += 1;
            }
            keep
        });
        if evicted > 0 {
            tracing::debug!("Evicted {} unread confirmation handoff(s)", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
