use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flightbooker_core::FieldErrors;
use flightbooker_order::{ConfirmationError, RetrievalError, SubmitError, WizardError};
use flightbooker_store::StoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    ValidationError(String, FieldErrors),
    NotFoundError(String),
    ConflictError(String),
    MissingState(ConfirmationError),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn from_store(err: StoreError) -> Self {
        AppError::NotFoundError(err.to_string())
    }

    pub fn from_wizard(err: WizardError) -> Self {
        match err {
            WizardError::PassengerOutOfRange(_) => AppError::NotFoundError(err.to_string()),
            WizardError::SubmissionPending | WizardError::AlreadySubmitted => {
                AppError::ConflictError(err.to_string())
            }
        }
    }

    pub fn from_submit(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(fields) => AppError::ValidationError(
                "Please correct the errors above before submitting.".to_string(),
                fields,
            ),
            SubmitError::NotOnFinalStep(_)
            | SubmitError::AlreadyPending
            | SubmitError::AlreadySubmitted => AppError::ConflictError(err.to_string()),
        }
    }

    pub fn from_retrieval(err: RetrievalError) -> Self {
        match err {
            RetrievalError::Invalid(fields) => {
                AppError::ValidationError("Invalid booking details".to_string(), fields)
            }
            RetrievalError::NotFound => AppError::NotFoundError(err.to_string()),
            RetrievalError::AlreadyPending => AppError::ConflictError(err.to_string()),
            RetrievalError::Source(source) => AppError::Anyhow(source.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::ValidationError(msg, fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": msg, "fields": fields }),
            ),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::MissingState(err) => (
                StatusCode::NOT_FOUND,
                json!({ "error": err.to_string(), "recovery": err.recovery() }),
            ),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
