// 🌐 HTTP API - Axum routes over the receipt processor

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::error::ReceiptError;
use crate::points::PointsBreakdown;
use crate::processor::ReceiptProcessor;
use crate::receipt::{Receipt, ReceiptId};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: ReceiptProcessor,
}

impl AppState {
    pub fn new(processor: ReceiptProcessor) -> Self {
        AppState { processor }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub receipts: usize,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Receipt not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

impl From<ReceiptError> for AppError {
    fn from(err: ReceiptError) -> Self {
        match err {
            ReceiptError::NotFound(_) => AppError::NotFound,
            ReceiptError::InvalidReceipt(msg) => AppError::MalformedPayload(msg),
            ReceiptError::Storage(msg) => {
                error!("Storage failure: {}", msg);
                AppError::Internal(msg)
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected receipt payload: {}", rejection.body_text());
        AppError::MalformedPayload(rejection.body_text())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /receipts/process - Store a receipt, return its id
async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Result<Json<IdResponse>, AppError> {
    let Json(receipt) = payload?;
    let id = state.processor.intake(receipt)?;

    Ok(Json(IdResponse { id: id.to_string() }))
}

/// GET /receipts/:id/points - Points for a stored receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, AppError> {
    let points = state.processor.points(&ReceiptId::from(id))?;

    Ok(Json(PointsResponse { points }))
}

/// GET /receipts/:id/breakdown - Per-rule points for a stored receipt
async fn get_breakdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsBreakdown>, AppError> {
    let breakdown = state.processor.breakdown(&ReceiptId::from(id))?;

    Ok(Json(breakdown))
}

/// GET /receipts/:id - The stored receipt itself
async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Receipt>, AppError> {
    let receipt = state.processor.lookup(&ReceiptId::from(id))?;

    Ok(Json(receipt))
}

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let receipts = state.processor.receipt_count()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        receipts,
    }))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .route("/receipts/:id/breakdown", get(get_breakdown))
        .route("/receipts/:id", get(get_receipt))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
