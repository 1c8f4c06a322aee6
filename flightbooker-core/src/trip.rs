use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::flight::FlightSegment;
use crate::passenger::PassengerType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TripStatus {
    Upcoming,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub passenger_type: PassengerType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub booking_reference: String,
    pub date: NaiveDate,
    pub destination: String,
    pub status: TripStatus,
    pub itinerary: Vec<FlightSegment>,
    pub passengers: Vec<PassengerSummary>,
    pub total_price: u32,
}

impl Trip {
    pub fn is_upcoming(&self) -> bool {
        self.status == TripStatus::Upcoming
    }
}
