use flightbooker_core::booking::{AncillarySelections, BookingPayload};
use flightbooker_core::flight::FlightSegment;
use flightbooker_core::passenger::PassengerRecord;
use serde::{Deserialize, Serialize};

/// Booking wizard steps, in order. No step can be skipped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    Passengers,
    Ancillaries,
    PaymentReview,
}

impl WizardStep {
    pub const COUNT: u8 = 3;

    /// 1-based position.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Passengers => 1,
            WizardStep::Ancillaries => 2,
            WizardStep::PaymentReview => 3,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Passengers => Some(WizardStep::Ancillaries),
            WizardStep::Ancillaries => Some(WizardStep::PaymentReview),
            WizardStep::PaymentReview => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Passengers => None,
            WizardStep::Ancillaries => Some(WizardStep::Passengers),
            WizardStep::PaymentReview => Some(WizardStep::Ancillaries),
        }
    }

    pub fn is_final(&self) -> bool {
        self.next().is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Submitted,
}

/// What a submitted booking carries forward. Card number and CVV stop at
/// the submission; only a `**** 1234` hint survives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub passengers: Vec<PassengerRecord>,
    pub contact_email: String,
    pub contact_phone: String,
    pub ancillaries: AncillarySelections,
    pub card_hint: String,
}

impl From<BookingPayload> for BookingDetails {
    fn from(payload: BookingPayload) -> Self {
        Self {
            card_hint: payload.payment.card_number.last_four(),
            passengers: payload.passengers,
            contact_email: payload.contact_email,
            contact_phone: payload.contact_phone,
            ancillaries: payload.ancillaries,
        }
    }
}

/// State the booking screen hands to the confirmation screen. Written once
/// by a successful submission, read once by the confirmation screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationHandoff {
    pub booking_details: BookingDetails,
    pub itinerary: Vec<FlightSegment>,
    pub total_price: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::Passengers.next(), Some(WizardStep::Ancillaries));
        assert_eq!(WizardStep::PaymentReview.next(), None);
        assert_eq!(WizardStep::Passengers.previous(), None);
        assert!(WizardStep::PaymentReview.is_final());
        assert_eq!(WizardStep::Ancillaries.number(), 2);
    }
}
