//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::booking::BookingError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/bookings", post(create_booking))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every station for the selection dropdowns.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let stations = state
        .booking
        .stations()
        .map(StationSummary::from_station)
        .collect();

    Json(StationListResponse { stations })
}

/// Plan a route and issue a ticket.
async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BookingResponse>, AppError> {
    // Parse JSON manually so malformed bodies get the usual error shape
    let req: BookingRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body_len = body.len(), "Invalid booking JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let booking = state.booking.book(&req.source, &req.destination)?;

    Ok(Json(BookingResponse::from_booking(&booking)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        let message = e.to_string();
        match e {
            BookingError::InvalidStation(_) | BookingError::SameStation => {
                AppError::BadRequest { message }
            }
            BookingError::NoRoute { .. } => AppError::NotFound { message },
            BookingError::Internal(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
