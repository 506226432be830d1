//! Render inputs consumed from the external data layer.
//!
//! The data layer owns persistence and identity; this crate only sees the
//! fields a card needs. The one contractual piece here is
//! [`identity_payload`], the string encoded into a guest's QR code.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::theme::ThemeSettings;

/// The event-side fields of a render request.
#[derive(Debug, Clone)]
pub struct EventRenderInput {
    pub id: i64,
    pub title: String,
    pub date: NaiveDateTime,
    pub venue: String,
    pub organizer_email: String,
    /// Recomputed from the event record per request; never cached here.
    pub theme: ThemeSettings,
    /// Optional raster background, composited at reduced opacity.
    pub background_image: Option<PathBuf>,
}

/// The guest-side fields of a render request.
#[derive(Debug, Clone)]
pub struct GuestRenderInput {
    pub id: i64,
    /// Honorific ("Mr", "Dr", ...).
    pub title: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub custom_message: Option<String>,
    pub seat_number: Option<String>,
    pub table_number: Option<String>,
    /// UUID assigned once at guest creation; immutable thereafter.
    pub qr_code: String,
}

impl GuestRenderInput {
    /// Display name as printed on the card.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.title, self.full_name)
    }
}

/// Builds the wire payload encoded into a guest's QR code.
///
/// The attendance-confirmation lookup on the other side parses the trailing
/// UUID out of this exact format, so any change has to be coordinated with
/// that consumer.
pub fn identity_payload(event_id: i64, guest_id: i64, qr_code: &str) -> String {
    format!("EVENT:{event_id}|GUEST:{guest_id}|CODE:{qr_code}")
}
