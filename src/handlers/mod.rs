//! HTTP handlers, grouped per service.

pub mod booking_handlers;
pub mod export_handlers;
pub mod health_handlers;
pub mod notify_handlers;
