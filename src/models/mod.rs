//! Core data model for the booking backend.
//!
//! A single entity, the booking, maps to the `bookings` table via
//! `sqlx::FromRow` and serializes naturally as JSON via `serde`.

pub mod booking;
