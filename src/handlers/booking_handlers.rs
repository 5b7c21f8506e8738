//! HTTP handlers for the booking service: list and create.
//! Validation and persistence live in `BookingService`; these handlers only
//! shape the HTTP envelope.

use crate::{errors::AppError, models::booking::NewBooking, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

/// Query params accepted by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub room_id: Option<String>,
}

/// GET `/bookings` — list confirmed bookings.
///
/// With `?room_id=` returns every confirmed booking for the room ordered by
/// check-in date descending; without it, the 50 most recently created.
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(q): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.bookings.list(q.room_id.as_deref()).await?;
    Ok(Json(json!({ "bookings": bookings })))
}

/// POST `/bookings` — create a booking.
///
/// 201 with the store-assigned id and timestamp, or 400 with the localized
/// validation message when a required field is missing.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<NewBooking>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.bookings.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking_id": created.id,
            "message": "Бронирование успешно создано!",
            "created_at": created.created_at,
        })),
    ))
}

/// Fallback for unsupported methods on the booking routes.
pub async fn method_not_allowed() -> AppError {
    AppError::new(StatusCode::METHOD_NOT_ALLOWED, "Метод не поддерживается")
}
