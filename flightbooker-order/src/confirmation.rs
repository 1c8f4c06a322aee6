use flightbooker_core::flight::FlightSegment;
use flightbooker_core::trip::PassengerSummary;
use rand::Rng;
use serde::Serialize;

use crate::models::ConfirmationHandoff;

const REFERENCE_PREFIX: &str = "FLB";
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// What the confirmation screen renders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    pub booking_reference: String,
    pub contact_email: String,
    pub card_hint: String,
    pub passengers: Vec<PassengerSummary>,
    pub itinerary: Vec<FlightSegment>,
    pub total_price: u32,
}

impl ConfirmationView {
    pub fn from_handoff<R: Rng + ?Sized>(handoff: ConfirmationHandoff, rng: &mut R) -> Self {
        let passengers = handoff
            .booking_details
            .passengers
            .iter()
            .map(|p| PassengerSummary {
                name: p.full_name(),
                passenger_type: p.passenger_type,
            })
            .collect();

        Self {
            booking_reference: generate_booking_reference(rng),
            contact_email: handoff.booking_details.contact_email,
            card_hint: handoff.booking_details.card_hint,
            passengers,
            itinerary: handoff.itinerary,
            total_price: handoff.total_price,
        }
    }

    /// Confirmation screen entry point. A missing handoff (direct visit or
    /// refresh) is reported, never unwrapped.
    pub fn load(handoff: Option<ConfirmationHandoff>) -> Result<Self, ConfirmationError> {
        match handoff {
            Some(handoff) => Ok(Self::from_handoff(handoff, &mut rand::thread_rng())),
            None => {
                tracing::warn!("Confirmation requested without booking data");
                Err(ConfirmationError::MissingBookingState)
            }
        }
    }
}

/// `FLB` followed by eight upper-case letters or digits.
pub fn generate_booking_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..8)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect();
    format!("{}{}", REFERENCE_PREFIX, suffix)
}

/// The single way out of an error panel.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecoveryAction {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("No booking information found. Please start a new booking.")]
    MissingBookingState,
}

impl ConfirmationError {
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            ConfirmationError::MissingBookingState => RecoveryAction {
                label: "Return to Home",
                path: "/",
            },
        }
    }
}
