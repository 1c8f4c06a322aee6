pub mod validation;
pub mod search;
pub mod passenger;
pub mod payment;
pub mod booking;
pub mod retrieval;
pub mod flight;
pub mod trip;
pub mod repository;

pub use validation::{FieldErrors, Validate};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Data source error: {0}")]
    DataSourceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
