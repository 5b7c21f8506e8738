use crate::services::{
    booking_service::BookingService, export_service::ExportService, mail_service::MailService,
};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the services hold their own `Arc`s internally.
#[derive(Clone)]
pub struct AppState {
    /// Booking CRUD against the shared store.
    pub bookings: BookingService,
    /// Spreadsheet rendering for the admin export.
    pub exporter: ExportService,
    /// Admin notification mail.
    pub notifier: MailService,
}
