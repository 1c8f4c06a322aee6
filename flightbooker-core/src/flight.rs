use chrono::{DateTime, Utc};
use flightbooker_shared::Money;
use serde::{Deserialize, Serialize};

use crate::search::CabinClass;

/// One leg: a single takeoff and landing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_city: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_city: Option<String>,
    pub arrival_time: DateTime<Utc>,
    pub duration: String,
}

/// A bookable itinerary as listed on the results screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightResult {
    pub id: String,
    pub airline: String,
    pub segments: Vec<FlightSegment>,
    pub price: u32,
    pub currency: String,
    pub cabin_class: CabinClass,
    pub stops: u32,
    pub total_duration: String,
}

impl FlightResult {
    pub fn origin(&self) -> Option<&str> {
        self.segments.first().map(|s| s.departure_airport.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.segments.last().map(|s| s.arrival_airport.as_str())
    }

    pub fn fare(&self) -> Money {
        Money::new(self.price, &self.currency)
    }
}
