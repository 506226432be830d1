//! karibu-renderer: invitation card rendering engine
//!
//! This crate takes an event's visual theme (colors, fonts, decoration
//! flags) plus a guest's personal data and deterministically composites a
//! print-resolution invitation card (background, border, title, guest
//! name, message, details panel, QR code, decorative motifs, footer) ready
//! for print or digital delivery, together with a standalone QR code for
//! attendance check-in.
//!
//! Persistence, dispatch, and CRUD live outside this crate: callers hand in
//! an [`EventRenderInput`] and a [`GuestRenderInput`] and get byte streams
//! and filenames back. Rendering is total: malformed colors, missing
//! fonts, and unreadable background images all degrade to documented
//! fallbacks instead of failing the card.
//!
//! # Example
//!
//! ```
//! use karibu_renderer::{
//!     CardRenderer, EventRenderInput, FontResolver, GuestRenderInput, ThemeSettings,
//! };
//!
//! let event = EventRenderInput {
//!     id: 1,
//!     title: "Amina & Joseph".into(),
//!     date: chrono::NaiveDate::from_ymd_opt(2026, 6, 20)
//!         .unwrap()
//!         .and_hms_opt(16, 0, 0)
//!         .unwrap(),
//!     venue: "Serena Gardens".into(),
//!     organizer_email: "host@example.com".into(),
//!     theme: ThemeSettings::default(),
//!     background_image: None,
//! };
//! let guest = GuestRenderInput {
//!     id: 7,
//!     title: "Ms".into(),
//!     full_name: "Neema Wanjiru".into(),
//!     email: "neema@example.com".into(),
//!     phone: None,
//!     custom_message: None,
//!     seat_number: None,
//!     table_number: None,
//!     qr_code: "123e4567-e89b-12d3-a456-426614174000".into(),
//! };
//!
//! let renderer = CardRenderer::new(FontResolver::default());
//! let result = renderer.generate(&event, &guest);
//! assert!(result.success);
//! assert!(result.card_png.is_some());
//! ```
//!
//! # Batch rendering
//!
//! [`BatchRenderer`] iterates a guest collection sequentially and collects
//! per-guest outcomes into a [`BatchReport`]; one guest's failure never
//! aborts the rest.

mod artifact;
mod batch;
mod card;
mod color;
mod draw;
mod error;
mod font;
mod input;
mod qr;
mod text;
mod theme;

pub use artifact::{card_filename, encode_png, qr_filename};
pub use batch::{BatchRenderer, BatchReport, GuestReport, GuestStatus, RenderCards};
pub use card::{
    CanvasSpec, CardRenderer, PRINT_HEIGHT, PRINT_WIDTH, RenderResult, STANDALONE_QR_SIZE,
};
pub use color::{FALLBACK_RGB, composite_over, contrast_of, hex_to_rgb, rgb_to_hex};
pub use error::RenderError;
pub use font::{DEFAULT_CACHE_CAPACITY, FontHandle, FontResolver};
pub use input::{EventRenderInput, GuestRenderInput, identity_payload};
pub use qr::render_qr;
pub use text::{ShrinkOptions, draw_text, measure_width, shrink_to_fit, wrap};
pub use theme::{
    BorderStyle, Decorations, TemplateChoice, ThemeColors, ThemeFonts, ThemeSettings,
};
