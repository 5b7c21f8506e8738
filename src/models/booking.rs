//! Represents a room booking made by a guest.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a booking.
///
/// Every create inserts `Confirmed`; no exposed operation writes any other
/// variant. `Cancelled` exists so historical rows with that status remain
/// representable (the list endpoint filters them out, the export includes
/// them).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Lowercase wire/storage form, as stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// A booking row as stored in the `bookings` table.
///
/// `id` and `created_at` are assigned by the store on insert and never
/// change afterwards. Rows are never updated or deleted by any exposed
/// operation.
#[derive(Serialize, Clone, FromRow, Debug)]
pub struct Booking {
    /// Store-assigned primary key.
    pub id: i64,

    /// Identifier of the booked room.
    pub room_id: String,

    /// Denormalized display name of the room at booking time.
    pub room_name: String,

    /// Name of the guest making the booking.
    pub guest_name: String,

    /// Contact phone of the guest.
    pub guest_phone: String,

    /// First night of the stay.
    pub check_in_date: NaiveDate,

    /// Day of departure, if the guest provided one.
    pub check_out_date: Option<NaiveDate>,

    /// Number of guests staying.
    pub guests_count: i64,

    /// Free-form comment from the guest (empty string when omitted).
    pub comment: String,

    /// Lifecycle status; always `confirmed` on insert.
    pub status: BookingStatus,

    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Client payload for creating a booking.
///
/// All fields arrive optional so validation can report missing required
/// fields with a single localized message instead of a deserialization
/// failure per field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBooking {
    pub room_id: Option<String>,
    pub room_name: Option<String>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub guests_count: Option<i64>,
    pub comment: Option<String>,
}

/// Booking-shaped payload for the admin notification email.
///
/// Everything is optional; absent fields fall back to localized
/// placeholders when the message is rendered. Dates stay as strings here
/// since they are only interpolated into the template, never parsed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyPayload {
    pub room_name: Option<String>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub guests_count: Option<i64>,
    pub comment: Option<String>,
}
