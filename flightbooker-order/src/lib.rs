pub mod models;
pub mod wizard;
pub mod confirmation;
pub mod retrieval;

pub use models::{BookingDetails, ConfirmationHandoff, SubmissionState, WizardStep};
pub use wizard::{BookingWizard, PendingSubmission, SubmitError, WizardError};
pub use confirmation::{ConfirmationError, ConfirmationView, RecoveryAction};
pub use retrieval::{RetrievalError, TripRetriever, TripsOverview};
