use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use flightbooker_core::booking::{Ancillary, AncillarySelections, BookingForm};
use flightbooker_core::flight::FlightResult;
use flightbooker_core::passenger::{PassengerForm, PassengerType};
use flightbooker_core::payment::PaymentForm;
use flightbooker_order::{BookingWizard, SubmissionState, WizardError, WizardStep};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct OpenBookingQuery {
    #[serde(rename = "flightId")]
    pub flight_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddPassengerRequest {
    #[serde(rename = "type", default)]
    pub passenger_type: PassengerType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub contact_email: String,
    pub contact_phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsRequest {
    pub agree_to_terms: bool,
}

/// Everything the booking screen needs to redraw itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub session_id: Uuid,
    pub flight: FlightResult,
    pub step: WizardStep,
    pub step_number: u8,
    pub progress_percent: u8,
    pub form: FormSnapshot,
    pub total_price: u32,
    pub submission: SubmissionState,
}

impl WizardSnapshot {
    fn capture(session_id: Uuid, wizard: &BookingWizard) -> Self {
        Self {
            session_id,
            flight: wizard.flight().clone(),
            step: wizard.step(),
            step_number: wizard.step().number(),
            progress_percent: wizard.progress_percent(),
            form: FormSnapshot::from(wizard.form()),
            total_price: wizard.total_price(),
            submission: wizard.submission(),
        }
    }
}

/// The editable form as echoed back to the client. Card number and CVV are
/// write-only: the client sees whether they were entered, never their value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub passengers: Vec<PassengerForm>,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment: PaymentSnapshot,
    pub ancillaries: AncillarySelections,
    pub agree_to_terms: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSnapshot {
    pub card_holder_name: String,
    pub expiry_date: String,
    pub card_hint: Option<String>,
    pub cvv_entered: bool,
}

impl From<&BookingForm> for FormSnapshot {
    fn from(form: &BookingForm) -> Self {
        let payment = &form.payment;
        let card_hint = (!payment.card_number.expose().is_empty())
            .then(|| payment.card_number.last_four());

        Self {
            passengers: form.passengers.clone(),
            contact_email: form.contact_email.clone(),
            contact_phone: form.contact_phone.clone(),
            payment: PaymentSnapshot {
                card_holder_name: payment.card_holder_name.clone(),
                expiry_date: payment.expiry_date.clone(),
                card_hint,
                cvv_entered: !payment.cvv.expose().is_empty(),
            },
            ancillaries: form.ancillaries,
            agree_to_terms: form.agree_to_terms,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub confirmation_token: Uuid,
    pub confirmation_path: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/passenger-payment", post(open_booking))
        .route("/v1/passenger-payment/{session}", get(get_booking))
        .route("/v1/passenger-payment/{session}/next", post(next_step))
        .route("/v1/passenger-payment/{session}/previous", post(previous_step))
        .route(
            "/v1/passenger-payment/{session}/passengers",
            post(add_passenger).delete(remove_passenger),
        )
        .route(
            "/v1/passenger-payment/{session}/passengers/{index}",
            put(update_passenger),
        )
        .route("/v1/passenger-payment/{session}/contact", put(set_contact))
        .route("/v1/passenger-payment/{session}/payment", put(set_payment))
        .route("/v1/passenger-payment/{session}/terms", put(set_terms))
        .route(
            "/v1/passenger-payment/{session}/ancillaries/{kind}/toggle",
            post(toggle_ancillary),
        )
        .route("/v1/passenger-payment/{session}/submit", post(submit_booking))
}

/// Runs one wizard mutation under the session lock and returns the new state.
async fn mutate<T>(
    state: &AppState,
    session_id: Uuid,
    change: impl FnOnce(&mut BookingWizard) -> Result<T, WizardError>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let handle = state.sessions.get(&session_id).map_err(AppError::from_store)?;
    let mut wizard = handle.lock().await;
    change(&mut *wizard).map_err(AppError::from_wizard)?;
    Ok(Json(WizardSnapshot::capture(session_id, &wizard)))
}

/// POST /v1/passenger-payment?flightId=
async fn open_booking(
    State(state): State<AppState>,
    Query(query): Query<OpenBookingQuery>,
) -> Result<(StatusCode, Json<WizardSnapshot>), AppError> {
    let flight_id = query
        .flight_id
        .unwrap_or_else(|| state.config.booking.default_flight_id.clone());

    let flight = state
        .flights
        .get_flight(&flight_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Flight {} not found", flight_id)))?;

    let wizard = BookingWizard::new(flight, state.pricing.clone());
    let (session_id, handle) = state.sessions.open(wizard);
    tracing::info!("Booking session {} opened for flight {}", session_id, flight_id);

    let wizard = handle.lock().await;
    Ok((StatusCode::CREATED, Json(WizardSnapshot::capture(session_id, &wizard))))
}

/// GET /v1/passenger-payment/{session}
async fn get_booking(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let handle = state.sessions.get(&session_id).map_err(AppError::from_store)?;
    let wizard = handle.lock().await;
    Ok(Json(WizardSnapshot::capture(session_id, &wizard)))
}

async fn next_step(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| {
        let step = wizard.next()?;
        tracing::info!("Session {} on step {}", session_id, step.number());
        Ok(step)
    })
    .await
}

async fn previous_step(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| {
        let step = wizard.previous()?;
        tracing::info!("Session {} on step {}", session_id, step.number());
        Ok(step)
    })
    .await
}

async fn add_passenger(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddPassengerRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| {
        wizard.add_passenger(request.passenger_type)
    })
    .await
}

/// DELETE removes the last passenger; the first one always stays.
async fn remove_passenger(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, BookingWizard::remove_passenger).await
}

async fn update_passenger(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
    Json(passenger): Json<PassengerForm>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| {
        wizard.update_passenger(index, passenger)
    })
    .await
}

async fn set_contact(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(contact): Json<ContactRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| {
        wizard.set_contact(contact.contact_email, contact.contact_phone)
    })
    .await
}

async fn set_payment(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payment): Json<PaymentForm>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| wizard.set_payment(payment)).await
}

async fn set_terms(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(terms): Json<TermsRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    mutate(&state, session_id, |wizard| {
        wizard.set_agree_to_terms(terms.agree_to_terms)
    })
    .await
}

/// POST /v1/passenger-payment/{session}/ancillaries/{kind}/toggle
async fn toggle_ancillary(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(Uuid, String)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ancillary = Ancillary::parse(&kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown ancillary: {}", kind)))?;
    mutate(&state, session_id, |wizard| wizard.toggle_ancillary(ancillary)).await
}

/// POST /v1/passenger-payment/{session}/submit
///
/// The session lock is released while the booking "travels", so a second
/// submit arriving meanwhile sees the pending state and gets a 409. Once the
/// booking is through the session is closed; the confirmation token is the
/// only way back to it.
async fn submit_booking(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let handle = state.sessions.get(&session_id).map_err(AppError::from_store)?;
    let pending = handle
        .lock()
        .await
        .begin_submit()
        .map_err(AppError::from_submit)?;

    let delay = state.config.booking.submit_delay();
    let sessions = state.sessions.clone();
    let handoffs = state.handoffs.clone();
    let wizard = handle.clone();
    // Completes even if the caller goes away, so the session never stays pending.
    let completion = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let handoff = wizard.lock().await.complete_submit(pending);
        sessions.close(&session_id);
        handoffs.put(handoff)
    });

    let token = match completion.await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Booking session {} failed to submit: {}", session_id, e);
            handle.lock().await.abandon_submit();
            return Err(e.into());
        }
    };

    tracing::info!("Booking session {} submitted", session_id);
    Ok(Json(SubmitResponse {
        confirmation_token: token,
        confirmation_path: format!("/v1/booking-confirmation/{}", token),
    }))
}
