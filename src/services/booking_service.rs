//! src/services/booking_service.rs
//!
//! BookingService — booking CRUD against SQLite. The table is append-only
//! from this service's perspective: rows are inserted once with status
//! `confirmed` and never updated or deleted by any exposed operation.

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{FromRow, QueryBuilder, SqlitePool, sqlite::Sqlite};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Rows returned by the unfiltered list are capped at the most recent 50.
const LIST_LIMIT: i64 = 50;

const BOOKING_COLUMNS: &str = "id, room_id, room_name, guest_name, guest_phone, \
     check_in_date, check_out_date, guests_count, comment, status, created_at";

#[derive(Debug, Error)]
pub enum BookingError {
    /// One of the required create fields is missing or empty.
    /// The message is shown to the guest verbatim.
    #[error("Заполните все обязательные поля")]
    MissingFields,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Filters for the export query. All predicates are optional and combined
/// with AND; the date bounds compare against `created_at` as inclusive
/// day-start boundaries, matching the raw-string comparison the admin UI
/// sends (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportFilter {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub room_id: Option<String>,
}

/// Outcome of a successful create: the two store-assigned fields.
#[derive(Debug, Clone, FromRow)]
pub struct CreatedBooking {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// BookingService provides the booking operations:
/// - Create a booking (validate required fields, insert with status `confirmed`)
/// - List bookings (confirmed only, by room or most recent)
/// - Fetch bookings for export (any status, filtered by date range/room)
///
/// Each call checks out one pool connection for exactly one query and
/// returns it on every exit path.
#[derive(Clone)]
pub struct BookingService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl BookingService {
    /// Create a new BookingService backed by the provided SQLite pool.
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// List bookings for the public site.
    ///
    /// With a `room_id`, returns every confirmed booking for that room
    /// ordered by check-in date descending. Without one, returns the 50
    /// most recently created confirmed bookings.
    pub async fn list(&self, room_id: Option<&str>) -> BookingResult<Vec<Booking>> {
        // An empty `?room_id=` arrives as Some(""); treat it as no filter.
        let room_id = room_id.filter(|s| !s.trim().is_empty());
        let rows = match room_id {
            Some(room) => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings
                     WHERE room_id = ? AND status = ?
                     ORDER BY check_in_date DESC"
                ))
                .bind(room)
                .bind(BookingStatus::Confirmed)
                .fetch_all(&*self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings
                     WHERE status = ?
                     ORDER BY created_at DESC
                     LIMIT ?"
                ))
                .bind(BookingStatus::Confirmed)
                .bind(LIST_LIMIT)
                .fetch_all(&*self.db)
                .await?
            }
        };

        debug!(count = rows.len(), room_id = ?room_id, "listed bookings");
        Ok(rows)
    }

    /// Validate the payload and insert a new booking.
    ///
    /// Required fields: room_id, room_name, guest_name, guest_phone,
    /// check_in_date. A missing or empty required field fails validation
    /// before anything touches the store, so no partial insert is possible.
    /// The store assigns `id` and `created_at`; status is always
    /// `confirmed`.
    pub async fn create(&self, payload: NewBooking) -> BookingResult<CreatedBooking> {
        let room_id = required(payload.room_id)?;
        let room_name = required(payload.room_name)?;
        let guest_name = required(payload.guest_name)?;
        let guest_phone = required(payload.guest_phone)?;
        let check_in_date = payload.check_in_date.ok_or(BookingError::MissingFields)?;
        let check_out_date = payload.check_out_date;
        let guests_count = payload.guests_count.unwrap_or(1);
        let comment = payload.comment.unwrap_or_default();

        self.ensure_room_available(&room_id, check_in_date, check_out_date)?;

        let created = sqlx::query_as::<_, CreatedBooking>(
            "INSERT INTO bookings
                (room_id, room_name, guest_name, guest_phone, check_in_date,
                 check_out_date, guests_count, comment, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, created_at",
        )
        .bind(&room_id)
        .bind(&room_name)
        .bind(&guest_name)
        .bind(&guest_phone)
        .bind(check_in_date)
        .bind(check_out_date)
        .bind(guests_count)
        .bind(&comment)
        .bind(BookingStatus::Confirmed)
        .fetch_one(&*self.db)
        .await?;

        debug!(id = created.id, room_id = %room_id, "created booking");
        Ok(created)
    }

    /// Fetch bookings for the admin export.
    ///
    /// Unlike [`list`](Self::list), status is unconstrained; rows of any
    /// status satisfy the filter. Ordered by creation time descending.
    pub async fn for_export(&self, filter: &ExportFilter) -> BookingResult<Vec<Booking>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE 1=1"
        ));

        // Omitted params often arrive as empty strings; either form means
        // "no filter", never a predicate that matches nothing.
        if let Some(date_from) = present(&filter.date_from) {
            query.push(" AND created_at >= ").push_bind(date_from);
        }
        if let Some(date_to) = present(&filter.date_to) {
            query.push(" AND created_at <= ").push_bind(date_to);
        }
        if let Some(room_id) = present(&filter.room_id) {
            query.push(" AND room_id = ").push_bind(room_id);
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build_query_as::<Booking>()
            .fetch_all(&*self.db)
            .await?;

        debug!(count = rows.len(), ?filter, "fetched bookings for export");
        Ok(rows)
    }

    /// Availability hook for the create path.
    ///
    /// Overlapping stays for the same room are currently accepted; the
    /// product has not defined a conflict rule yet. When it does, the check
    /// belongs here so the rest of the create path stays untouched.
    fn ensure_room_available(
        &self,
        _room_id: &str,
        _check_in: NaiveDate,
        _check_out: Option<NaiveDate>,
    ) -> BookingResult<()> {
        Ok(())
    }
}

/// A filter value counts only when it is non-empty after trimming.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Treat `None` and whitespace-only strings alike as missing.
fn required(value: Option<String>) -> BookingResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BookingError::MissingFields),
    }
}
