//! Defines routes for the booking, export and notification services.
//!
//! ## Structure
//! - **Booking service**
//!   - `GET  /bookings`        — list confirmed bookings (supports room_id)
//!   - `POST /bookings`        — create a booking
//! - **Export service**
//!   - `GET  /bookings/export` — download bookings as xlsx (date_from,
//!     date_to, room_id filters)
//! - **Notification service**
//!   - `POST /notifications`   — email the admin about a new booking
//!
//! Each group carries its own permissive CORS layer; preflight OPTIONS is
//! answered with 200 and an empty body by the layer itself. Health probes
//! are mounted at the root without CORS.

use crate::{
    handlers::{
        booking_handlers::{create_booking, list_bookings, method_not_allowed},
        export_handlers::export_bookings,
        health_handlers::{healthz, readyz},
        notify_handlers::send_notification,
    },
    state::AppState,
};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Preflight responses are cacheable for a day.
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Build and return the router for all services.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    let bookings = Router::new()
        .route(
            "/bookings",
            get(list_bookings)
                .post(create_booking)
                .fallback(method_not_allowed),
        )
        .layer(cors_layer([Method::GET, Method::POST, Method::OPTIONS]));

    let export = Router::new()
        .route("/bookings/export", get(export_bookings))
        .layer(cors_layer([Method::GET, Method::OPTIONS]));

    let notifications = Router::new()
        .route(
            "/notifications",
            post(send_notification).fallback(method_not_allowed),
        )
        .layer(cors_layer([Method::POST, Method::OPTIONS]));

    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(bookings)
        .merge(export)
        .merge(notifications)
}

/// Permissive CORS for a route group: any origin, `Content-Type` header,
/// the group's methods.
fn cors_layer<M>(methods: M) -> CorsLayer
where
    M: Into<tower_http::cors::AllowMethods>,
{
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}
