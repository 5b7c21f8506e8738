//! HTTP handler for the admin notification email.
//!
//! Always responds 200; the nested `success` flag distinguishes sent,
//! skipped (mail not configured) and failed sends. Transport errors never
//! surface as 5xx.

use crate::{models::booking::NotifyPayload, state::AppState};
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

/// POST `/notifications` — email the admin about a new booking.
pub async fn send_notification(
    State(state): State<AppState>,
    Json(payload): Json<NotifyPayload>,
) -> impl IntoResponse {
    let outcome = state.notifier.notify(&payload).await;

    Json(json!({
        "success": outcome.is_success(),
        "message": outcome.message(),
    }))
}
