use serde::{Deserialize, Serialize};

use crate::CatalogError;

const AIRPORTS: &str = include_str!("../data/airports.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub code: String,
    pub name: String,
}

/// Suggestions behind the origin and destination inputs.
pub struct AirportDirectory {
    airports: Vec<Airport>,
}

impl AirportDirectory {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    pub fn mock() -> Result<Self, CatalogError> {
        let airports = serde_json::from_str(AIRPORTS).map_err(|e| CatalogError::MalformedData {
            source_name: "airports",
            message: e.to_string(),
        })?;
        Ok(Self::new(airports))
    }

    /// Case-insensitive substring match on code or name. An empty query
    /// matches everything.
    pub fn suggest(&self, query: &str) -> Vec<Airport> {
        let needle = query.to_lowercase();
        self.airports
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle) || a.code.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}
