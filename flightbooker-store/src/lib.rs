pub mod app_config;
pub mod sessions;
pub mod handoff;

pub use app_config::Config;
pub use sessions::{SessionHandle, WizardSessions, DEFAULT_SESSION_TTL};
pub use handoff::{HandoffStore, DEFAULT_HANDOFF_TTL};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Booking session not found: {0}")]
    SessionNotFound(uuid::Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;
