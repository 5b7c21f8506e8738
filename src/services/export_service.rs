//! src/services/export_service.rs
//!
//! ExportService — renders booking rows into a downloadable spreadsheet.
//! The actual workbook writing sits behind the [`SpreadsheetRenderer`]
//! trait so tests can substitute a fake backend, and so the "renderer
//! missing" failure mode stays representable: unlike the mail path, a
//! missing renderer is a hard configuration error, not a soft skip.

use crate::models::booking::Booking;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use std::sync::Arc;
use thiserror::Error;

/// Fixed header titles; exactly 10 columns, matching what the admin UI
/// expects to find in the exported file.
pub const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "Номер",
    "Гость",
    "Телефон",
    "Дата заезда",
    "Дата выезда",
    "Гостей",
    "Комментарий",
    "Статус",
    "Создано",
];

/// Sheet name shown in the workbook tab.
const SHEET_NAME: &str = "Бронирования";

/// Brand fill color for the header row.
const HEADER_FILL: u32 = 0x10B981;

/// Column widths are auto-sized to content but never wider than this.
const MAX_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet renderer is not available")]
    RendererUnavailable,
    #[error("failed to render workbook: {0}")]
    Render(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

impl From<XlsxError> for ExportError {
    fn from(err: XlsxError) -> Self {
        ExportError::Render(err.to_string())
    }
}

/// Capability: render booking rows into a tabular binary document.
pub trait SpreadsheetRenderer: Send + Sync {
    fn render(&self, bookings: &[Booking]) -> ExportResult<Vec<u8>>;
}

/// ExportService holds an optional renderer backend. `None` models the
/// deployment where the rendering capability is absent; every export then
/// fails fast with [`ExportError::RendererUnavailable`].
#[derive(Clone)]
pub struct ExportService {
    renderer: Option<Arc<dyn SpreadsheetRenderer>>,
}

impl ExportService {
    pub fn new(renderer: Option<Arc<dyn SpreadsheetRenderer>>) -> Self {
        Self { renderer }
    }

    /// Default production service backed by the xlsx renderer.
    pub fn xlsx() -> Self {
        Self::new(Some(Arc::new(XlsxRenderer)))
    }

    /// Service without a rendering backend.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Render the rows, or fail if no backend is configured.
    pub fn render(&self, bookings: &[Booking]) -> ExportResult<Vec<u8>> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or(ExportError::RendererUnavailable)?;
        renderer.render(bookings)
    }

    /// Download filename embedding the generation timestamp.
    pub fn attachment_filename(at: DateTime<Utc>) -> String {
        format!("bookings_{}.xlsx", at.format("%Y%m%d_%H%M%S"))
    }
}

/// Workbook renderer backed by `rust_xlsxwriter`.
pub struct XlsxRenderer;

impl SpreadsheetRenderer for XlsxRenderer {
    fn render(&self, bookings: &[Booking]) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        for (col, title) in EXPORT_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        let rows: Vec<[String; 10]> = bookings.iter().map(booking_cells).collect();
        for (i, cells) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            // ID and guest count stay numeric cells; everything else is text.
            worksheet.write_number(row, 0, bookings[i].id as f64)?;
            worksheet.write_number(row, 6, bookings[i].guests_count as f64)?;
            for col in [1usize, 2, 3, 4, 5, 7, 8, 9] {
                worksheet.write_string(row, col as u16, cells[col].as_str())?;
            }
        }

        for (col, width) in column_widths(&rows).into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Render one booking as the 10 cell values in column order.
fn booking_cells(booking: &Booking) -> [String; 10] {
    [
        booking.id.to_string(),
        booking.room_name.clone(),
        booking.guest_name.clone(),
        booking.guest_phone.clone(),
        booking.check_in_date.to_string(),
        booking
            .check_out_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        booking.guests_count.to_string(),
        booking.comment.clone(),
        booking.status.as_str().to_string(),
        booking
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    ]
}

/// Width per column: longest rendered value (header included) plus padding,
/// capped at [`MAX_COLUMN_WIDTH`].
fn column_widths(rows: &[[String; 10]]) -> [usize; 10] {
    let mut widths = [0usize; 10];
    for (col, title) in EXPORT_HEADERS.iter().enumerate() {
        widths[col] = title.chars().count();
    }
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }
    for width in widths.iter_mut() {
        *width = (*width + 2).min(MAX_COLUMN_WIDTH);
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
    use chrono::NaiveDate;

    fn booking(id: i64, comment: &str) -> Booking {
        Booking {
            id,
            room_id: "12".into(),
            room_name: "Deluxe A".into(),
            guest_name: "Ivan".into(),
            guest_phone: "+79001234567".into(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: None,
            guests_count: 2,
            comment: comment.into(),
            status: BookingStatus::Confirmed,
            created_at: "2024-05-01T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn header_row_is_exactly_ten_columns() {
        assert_eq!(EXPORT_HEADERS.len(), 10);
    }

    #[test]
    fn cells_render_dates_iso_and_null_fields_empty() {
        let cells = booking_cells(&booking(7, ""));
        assert_eq!(cells[0], "7");
        assert_eq!(cells[4], "2024-06-01");
        assert_eq!(cells[5], "", "null check-out renders empty");
        assert_eq!(cells[7], "", "null comment renders empty");
        assert_eq!(cells[8], "confirmed");
        assert_eq!(cells[9], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn column_widths_track_longest_cell_and_cap_at_fifty() {
        let long_comment = "x".repeat(120);
        let rows = vec![booking_cells(&booking(1, &long_comment))];
        let widths = column_widths(&rows);

        // Comment column hits the cap.
        assert_eq!(widths[7], 50);
        // Header is the longest value for the ID column.
        assert_eq!(widths[0], "ID".len() + 2);
    }

    #[test]
    fn xlsx_renderer_produces_a_zip_container() {
        let bytes = XlsxRenderer
            .render(&[booking(1, "hi"), booking(2, "")])
            .expect("render");
        // xlsx is a zip archive; check the magic instead of parsing.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn disabled_service_reports_renderer_unavailable() {
        let err = ExportService::disabled()
            .render(&[])
            .expect_err("must fail");
        assert!(matches!(err, ExportError::RendererUnavailable));
    }

    #[test]
    fn filename_embeds_generation_timestamp() {
        let at = "2024-05-01T10:02:03Z".parse().unwrap();
        assert_eq!(
            ExportService::attachment_filename(at),
            "bookings_20240501_100203.xlsx"
        );
    }
}
