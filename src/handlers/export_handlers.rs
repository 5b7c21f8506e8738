//! HTTP handler for the admin spreadsheet export.

use crate::{
    errors::AppError,
    services::{booking_service::ExportFilter, export_service::ExportService},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use chrono::Utc;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET `/bookings/export` — render filtered bookings as an xlsx download.
///
/// Optional `date_from`, `date_to` (inclusive bounds on creation time) and
/// `room_id` filters combine with AND. Unlike the public list, rows of any
/// status are included. Responds 500 if the rendering backend is missing.
pub async fn export_bookings(
    State(state): State<AppState>,
    Query(filter): Query<ExportFilter>,
) -> Result<Response, AppError> {
    let rows = state.bookings.for_export(&filter).await?;
    let bytes = state.exporter.render(&rows)?;

    let filename = ExportService::attachment_filename(Utc::now());
    let disposition = format!("attachment; filename=\"{}\"", filename);

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    Ok(response)
}
