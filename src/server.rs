use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::message;
use crate::models::{
    HealthStatus, MessageRequest, MessageResponse, RiskPrediction, ServiceInfo, StudentInfo,
};
use crate::risk::{self, RiskPredictor};

pub const SERVICE_NAME: &str = "student-success-api";

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn RiskPredictor>,
}

impl AppState {
    pub fn new(predictor: impl RiskPredictor + 'static) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict-risk", post(predict_risk))
        .route("/message", post(compose_message))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Student Success Intelligence Platform API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/health", "/predict-risk", "/message"],
    })
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: SERVICE_NAME,
    })
}

async fn predict_risk(
    State(state): State<AppState>,
    payload: Result<Json<StudentInfo>, JsonRejection>,
) -> Result<Json<RiskPrediction>, ApiError> {
    let Json(student) = payload.map_err(rejection_to_error)?;
    let prediction = risk::predict_risk(state.predictor.as_ref(), student)?;
    Ok(Json(prediction))
}

async fn compose_message(
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_to_error)?;
    let response = message::compose_message(request)?;
    Ok(Json(response))
}

/// Unreadable or mistyped bodies are caller defects, reported like any other
/// validation failure.
fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    ApiError::validation(rejection.body_text())
}
