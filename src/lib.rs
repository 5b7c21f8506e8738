//! Booking backend for a small lodging website.
//!
//! Three HTTP route groups share one SQLite store: booking create/list,
//! xlsx export for the admin, and an email notification on new bookings.
//! Exposed as a library so integration tests can build the router with
//! fake renderer/mail backends.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
