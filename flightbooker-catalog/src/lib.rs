pub mod flights;
pub mod trips;
pub mod airports;
pub mod pricing;

pub use flights::StaticFlightProvider;
pub use trips::StaticTripProvider;
pub use airports::{Airport, AirportDirectory};
pub use pricing::{PricingConfig, PricingEngine};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed catalog data ({source_name}): {message}")]
    MalformedData { source_name: &'static str, message: String },
}

impl From<CatalogError> for flightbooker_core::CoreError {
    fn from(err: CatalogError) -> Self {
        flightbooker_core::CoreError::DataSourceError(err.to_string())
    }
}
