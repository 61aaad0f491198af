use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use medi_diagnose::PredictionService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub debug: bool,
}

impl AppState {
    pub fn new(service: PredictionService, debug: bool) -> Self {
        Self {
            service: Arc::new(service),
            debug,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SymptomsResponse<'a> {
    pub symptoms: &'a [String],
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/symptoms", get(symptoms))
        .route("/api/predict", post(predict))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn symptoms(State(state): State<AppState>) -> Response {
    Json(SymptomsResponse {
        symptoms: state.service.symptoms(),
    })
    .into_response()
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return ApiError::MalformedRequest(rejection.body_text()).into_response_with(state.debug)
        }
    };

    let symptoms = request.symptoms.unwrap_or_default();
    match state.service.predict(&symptoms) {
        Ok(prediction) => Json(prediction).into_response(),
        Err(err) => ApiError::from(err).into_response_with(state.debug),
    }
}
