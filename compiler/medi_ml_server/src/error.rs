//! HTTP error responses
//!
//! Every failure is answered with `{"error": <message>}`. Messages for
//! server-side failures are fixed templates; the underlying detail is logged
//! and only appended to the message when the server runs in debug mode.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medi_diagnose::{EncodeError, PredictError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No symptoms provided")]
    NoSymptoms,
    #[error(transparent)]
    UnknownSymptoms(EncodeError),
    #[error("Malformed request")]
    MalformedRequest(String),
    #[error("Prediction failed")]
    Inference(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoSymptoms | ApiError::UnknownSymptoms(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedRequest(_) | ApiError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> Option<&str> {
        match self {
            ApiError::MalformedRequest(detail) | ApiError::Inference(detail) => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Client-facing message, with detail appended when `debug` is set
    pub fn message(&self, debug: bool) -> String {
        match self.detail() {
            Some(detail) if debug => format!("{self}: {detail}"),
            _ => self.to_string(),
        }
    }

    pub fn into_response_with(self, debug: bool) -> Response {
        let status = self.status();
        if let Some(detail) = self.detail() {
            log::error!("{self}: {detail}");
        }
        let body = ErrorBody {
            error: self.message(debug),
        };
        (status, Json(body)).into_response()
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::NoSymptoms => ApiError::NoSymptoms,
            PredictError::Encoding(e) => ApiError::UnknownSymptoms(e),
            PredictError::Inference(e) => ApiError::Inference(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
