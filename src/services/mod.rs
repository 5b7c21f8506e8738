//! Service layer: booking CRUD, spreadsheet export, mail notification.

pub mod booking_service;
pub mod export_service;
pub mod mail_service;
