use flightbooker_catalog::PricingEngine;
use flightbooker_core::booking::{Ancillary, BookingForm, BookingPayload};
use flightbooker_core::flight::FlightResult;
use flightbooker_core::passenger::{PassengerForm, PassengerType};
use flightbooker_core::payment::PaymentForm;
use flightbooker_core::validation::{FieldErrors, Validate};
use flightbooker_shared::Money;
use std::time::Duration;

use crate::models::{ConfirmationHandoff, SubmissionState, WizardStep};

/// Passenger & payment wizard for one selected flight.
///
/// Steps only move one at a time. Fields are not checked when moving
/// forward; the whole form is validated on submit. While a submission is
/// pending every control is disabled.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    flight: FlightResult,
    pricing: PricingEngine,
    step: WizardStep,
    form: BookingForm,
    total_price: u32,
    submission: SubmissionState,
}

/// Proof that validation passed and the submit button is now locked.
#[derive(Debug)]
pub struct PendingSubmission {
    payload: BookingPayload,
}

impl PendingSubmission {
    pub fn payload(&self) -> &BookingPayload {
        &self.payload
    }
}

impl BookingWizard {
    pub fn new(flight: FlightResult, pricing: PricingEngine) -> Self {
        let form = BookingForm::default();
        let total_price = pricing.total(flight.price, &form.ancillaries);
        Self {
            flight,
            pricing,
            step: WizardStep::Passengers,
            form,
            total_price,
            submission: SubmissionState::Idle,
        }
    }

    pub fn flight(&self) -> &FlightResult {
        &self.flight
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn total_price(&self) -> u32 {
        self.total_price
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() as u16 * 100) / WizardStep::COUNT as u16) as u8
    }

    /// Advance one step; a no-op on the last step.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        if let Some(step) = self.step.next() {
            self.step = step;
        }
        Ok(self.step)
    }

    /// Go back one step; a no-op on the first step.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        if let Some(step) = self.step.previous() {
            self.step = step;
        }
        Ok(self.step)
    }

    /// Append a blank passenger and return its index.
    pub fn add_passenger(&mut self, passenger_type: PassengerType) -> Result<usize, WizardError> {
        self.ensure_editable()?;
        self.form.passengers.push(PassengerForm::blank(passenger_type));
        Ok(self.form.passengers.len() - 1)
    }

    /// Drop the last passenger. Returns `false` and keeps the list when only
    /// one passenger is left.
    pub fn remove_passenger(&mut self) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        if self.form.passengers.len() <= 1 {
            return Ok(false);
        }
        self.form.passengers.pop();
        Ok(true)
    }

    pub fn update_passenger(
        &mut self,
        index: usize,
        passenger: PassengerForm,
    ) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let slot = self
            .form
            .passengers
            .get_mut(index)
            .ok_or(WizardError::PassengerOutOfRange(index))?;
        *slot = passenger;
        Ok(())
    }

    pub fn set_contact(&mut self, email: String, phone: String) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.form.contact_email = email;
        self.form.contact_phone = phone;
        Ok(())
    }

    pub fn set_payment(&mut self, payment: PaymentForm) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.form.payment = payment;
        Ok(())
    }

    pub fn set_agree_to_terms(&mut self, agreed: bool) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.form.agree_to_terms = agreed;
        Ok(())
    }

    /// Flip an add-on and return the new running total.
    pub fn toggle_ancillary(&mut self, ancillary: Ancillary) -> Result<u32, WizardError> {
        self.ensure_editable()?;
        self.form.ancillaries.toggle(ancillary);
        self.total_price = self.pricing.total(self.flight.price, &self.form.ancillaries);
        Ok(self.total_price)
    }

    /// Validate everything and lock the form for submission.
    ///
    /// On field errors the wizard stays on the review step and stays
    /// editable. A second call while a submission is pending does nothing.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        match self.submission {
            SubmissionState::Pending => return Err(SubmitError::AlreadyPending),
            SubmissionState::Submitted => return Err(SubmitError::AlreadySubmitted),
            SubmissionState::Idle => {}
        }
        if !self.step.is_final() {
            return Err(SubmitError::NotOnFinalStep(self.step));
        }

        let payload = self.form.validate().map_err(|errors| {
            tracing::info!(
                "Booking for flight {} rejected with {} invalid field(s)",
                self.flight.id,
                errors.len()
            );
            SubmitError::Invalid(errors)
        })?;

        self.submission = SubmissionState::Pending;
        tracing::info!(
            "Submitting booking for flight {} ({} passenger(s), total {})",
            self.flight.id,
            payload.passengers.len(),
            Money::new(self.total_price, &self.flight.currency)
        );
        Ok(PendingSubmission { payload })
    }

    /// Finish a pending submission and build the confirmation handoff.
    /// Card fields are wiped from the form once the booking is through.
    pub fn complete_submit(&mut self, pending: PendingSubmission) -> ConfirmationHandoff {
        self.submission = SubmissionState::Submitted;
        self.form.payment = PaymentForm::default();
        ConfirmationHandoff {
            booking_details: pending.payload.into(),
            itinerary: self.flight.segments.clone(),
            total_price: self.total_price,
        }
    }

    /// Drop a pending submission. Nothing was committed, so the form is
    /// simply unlocked again.
    pub fn abandon_submit(&mut self) {
        if self.submission == SubmissionState::Pending {
            self.submission = SubmissionState::Idle;
        }
    }

    /// Whole submission in one call, with the confirmation delay.
    pub async fn submit(&mut self, delay: Duration) -> Result<ConfirmationHandoff, SubmitError> {
        let pending = self.begin_submit()?;
        tokio::time::sleep(delay).await;
        Ok(self.complete_submit(pending))
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        match self.submission {
            SubmissionState::Idle => Ok(()),
            SubmissionState::Pending => Err(WizardError::SubmissionPending),
            SubmissionState::Submitted => Err(WizardError::AlreadySubmitted),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("A submission is in progress")]
    SubmissionPending,

    #[error("Booking has already been submitted")]
    AlreadySubmitted,

    #[error("No passenger at index {0}")]
    PassengerOutOfRange(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please correct the errors above before submitting.")]
    Invalid(FieldErrors),

    #[error("Submission is only available on the review step (currently {0:?})")]
    NotOnFinalStep(WizardStep),

    #[error("A submission is already in progress")]
    AlreadyPending,

    #[error("Booking has already been submitted")]
    AlreadySubmitted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightbooker_catalog::StaticFlightProvider;
    use flightbooker_core::repository::FlightProvider;
    use flightbooker_shared::Masked;

    async fn wizard() -> BookingWizard {
        let flight = StaticFlightProvider::mock()
            .unwrap()
            .get_flight("FR001")
            .await
            .unwrap()
            .unwrap();
        BookingWizard::new(flight, PricingEngine::default())
    }

    fn fill(wizard: &mut BookingWizard) {
        wizard
            .update_passenger(
                0,
                PassengerForm {
                    first_name: "John".to_string(),
                    last_name: "Doe".to_string(),
                    dob: "1985-02-14".to_string(),
                    gender: Some("male".to_string()),
                    passenger_type: PassengerType::Adult,
                },
            )
            .unwrap();
        wizard
            .set_contact("john.doe@example.com".to_string(), "5551234567".to_string())
            .unwrap();
        wizard
            .set_payment(PaymentForm {
                card_number: Masked::new("4111111111111111".to_string()),
                card_holder_name: "John Doe".to_string(),
                expiry_date: "11/28".to_string(),
                cvv: Masked::new("321".to_string()),
            })
            .unwrap();
        wizard.set_agree_to_terms(true).unwrap();
    }

    #[tokio::test]
    async fn test_initial_state() {
        let wizard = wizard().await;
        assert_eq!(wizard.step(), WizardStep::Passengers);
        assert_eq!(wizard.form().passengers.len(), 1);
        assert_eq!(wizard.form().passengers[0].passenger_type, PassengerType::Adult);
        assert_eq!(wizard.total_price(), 350);
        assert_eq!(wizard.progress_percent(), 33);
    }

    #[tokio::test]
    async fn test_step_bounds() {
        let mut wizard = wizard().await;

        assert_eq!(wizard.previous().unwrap(), WizardStep::Passengers);

        assert_eq!(wizard.next().unwrap(), WizardStep::Ancillaries);
        assert_eq!(wizard.next().unwrap(), WizardStep::PaymentReview);
        assert_eq!(wizard.next().unwrap(), WizardStep::PaymentReview);
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[tokio::test]
    async fn test_next_then_previous_keeps_passengers() {
        let mut wizard = wizard().await;
        fill(&mut wizard);
        wizard.add_passenger(PassengerType::Child).unwrap();
        let before = wizard.form().passengers.clone();

        wizard.next().unwrap();
        wizard.previous().unwrap();

        assert_eq!(wizard.step(), WizardStep::Passengers);
        assert_eq!(wizard.form().passengers, before);
    }

    #[tokio::test]
    async fn test_next_does_not_validate() {
        let mut wizard = wizard().await;
        wizard.next().unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.step(), WizardStep::PaymentReview);
    }

    #[tokio::test]
    async fn test_remove_keeps_at_least_one_passenger() {
        let mut wizard = wizard().await;
        assert!(!wizard.remove_passenger().unwrap());
        assert_eq!(wizard.form().passengers.len(), 1);

        assert_eq!(wizard.add_passenger(PassengerType::Infant).unwrap(), 1);
        assert!(wizard.remove_passenger().unwrap());
        assert_eq!(wizard.form().passengers.len(), 1);
        assert!(!wizard.remove_passenger().unwrap());
    }

    #[tokio::test]
    async fn test_update_out_of_range() {
        let mut wizard = wizard().await;
        let err = wizard.update_passenger(3, PassengerForm::default()).unwrap_err();
        assert!(matches!(err, WizardError::PassengerOutOfRange(3)));
    }

    #[tokio::test]
    async fn test_running_total() {
        let mut wizard = wizard().await;
        assert_eq!(wizard.toggle_ancillary(Ancillary::ExtraBaggage).unwrap(), 400);
        assert_eq!(wizard.toggle_ancillary(Ancillary::TravelInsurance).unwrap(), 425);
        assert_eq!(wizard.toggle_ancillary(Ancillary::ExtraBaggage).unwrap(), 375);
        assert_eq!(wizard.toggle_ancillary(Ancillary::TravelInsurance).unwrap(), 350);
    }

    #[tokio::test]
    async fn test_submit_only_from_review_step() {
        let mut wizard = wizard().await;
        fill(&mut wizard);
        let err = wizard.begin_submit().unwrap_err();
        assert!(matches!(err, SubmitError::NotOnFinalStep(WizardStep::Passengers)));
    }

    #[tokio::test]
    async fn test_invalid_submit_stays_on_review_step() {
        let mut wizard = wizard().await;
        wizard.next().unwrap();
        wizard.next().unwrap();

        match wizard.begin_submit() {
            Err(SubmitError::Invalid(errors)) => {
                assert!(errors.contains("passengers[0].firstName"));
                assert!(errors.contains("contactEmail"));
                assert!(errors.contains("payment.cardNumber"));
                assert!(errors.contains("agreeToTerms"));
            }
            other => panic!("expected field errors, got {:?}", other),
        }
        assert_eq!(wizard.step(), WizardStep::PaymentReview);
        assert_eq!(wizard.submission(), SubmissionState::Idle);
        assert!(wizard.set_agree_to_terms(true).is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_submit_is_suppressed() {
        let mut wizard = wizard().await;
        fill(&mut wizard);
        wizard.next().unwrap();
        wizard.next().unwrap();

        let pending = wizard.begin_submit().unwrap();
        assert!(matches!(wizard.begin_submit(), Err(SubmitError::AlreadyPending)));
        assert!(matches!(wizard.previous(), Err(WizardError::SubmissionPending)));
        assert!(matches!(
            wizard.toggle_ancillary(Ancillary::ExtraBaggage),
            Err(WizardError::SubmissionPending)
        ));

        let handoff = wizard.complete_submit(pending);
        assert_eq!(handoff.total_price, 350);
        assert_eq!(wizard.submission(), SubmissionState::Submitted);
        assert!(matches!(wizard.begin_submit(), Err(SubmitError::AlreadySubmitted)));
    }

    #[tokio::test]
    async fn test_abandon_unlocks_form() {
        let mut wizard = wizard().await;
        fill(&mut wizard);
        wizard.next().unwrap();
        wizard.next().unwrap();

        let _pending = wizard.begin_submit().unwrap();
        wizard.abandon_submit();
        assert_eq!(wizard.submission(), SubmissionState::Idle);
        assert!(wizard.previous().is_ok());
    }

    #[tokio::test]
    async fn test_submit_builds_handoff() {
        let mut wizard = wizard().await;
        fill(&mut wizard);
        wizard.next().unwrap();
        wizard.toggle_ancillary(Ancillary::ExtraBaggage).unwrap();
        wizard.toggle_ancillary(Ancillary::TravelInsurance).unwrap();
        wizard.next().unwrap();

        let handoff = wizard.submit(Duration::ZERO).await.unwrap();
        assert_eq!(handoff.total_price, 425);
        assert_eq!(handoff.itinerary.len(), 1);
        assert_eq!(handoff.itinerary[0].flight_number, "SH201");
        assert_eq!(handoff.booking_details.contact_email, "john.doe@example.com");
        assert!(handoff.booking_details.ancillaries.extra_baggage);
    }

    #[tokio::test]
    async fn test_card_data_does_not_outlive_submission() {
        let mut wizard = wizard().await;
        fill(&mut wizard);
        wizard.next().unwrap();
        wizard.next().unwrap();

        let handoff = wizard.submit(Duration::ZERO).await.unwrap();
        assert_eq!(handoff.booking_details.card_hint, "**** 1111");

        let json = serde_json::to_string(&handoff).unwrap();
        assert!(!json.contains("4111111111111111"));
        assert!(!json.contains("cvv"));
        assert!(!json.contains("cardNumber"));

        assert_eq!(wizard.form().payment, PaymentForm::default());
    }
}
