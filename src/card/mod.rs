//! Card compositing pipeline.
//!
//! A card is produced by a fixed sequence of stages over one mutable
//! canvas: background, border, header, guest panel, message, details panel,
//! QR block, decorative motifs, footer. Stages thread a vertical cursor so
//! sections stack without absolute coordinates; the QR block and motifs are
//! the only full-canvas-relative painters.
//!
//! The pipeline never aborts mid-card. Each stage runs behind a boundary
//! that logs its error and substitutes a fallback cursor, and the canvas
//! starts out blank white at the correct dimensions, so even a run where
//! every stage fails still yields a full-size artifact.

pub(crate) mod frame;
pub(crate) mod qr_block;
pub(crate) mod sections;

use image::{Rgb, Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, warn};

use crate::artifact;
use crate::color;
use crate::error::RenderError;
use crate::font::FontResolver;
use crate::input::{EventRenderInput, GuestRenderInput, identity_payload};
use crate::qr;

/// Card width at print resolution: 5 in at 300 DPI.
pub const PRINT_WIDTH: u32 = 1500;
/// Card height at print resolution: 7 in at 300 DPI.
pub const PRINT_HEIGHT: u32 = 2100;
/// Print DPI over the 96-DPI reference all layout constants are written in.
pub const PRINT_SCALE: f32 = 300.0 / 96.0;
/// Edge size of the standalone QR artifact.
pub const STANDALONE_QR_SIZE: u32 = 300;

// Safe margin from the canvas edge, in reference pixels.
pub(crate) const REF_MARGIN: f32 = 20.0;

/// Canvas dimensions plus the factor that converts 96-DPI reference
/// constants into device pixels.
///
/// Applying the factor through [`px`](Self::px) everywhere keeps preview
/// and print output proportional; no stage carries raw pixel literals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl CanvasSpec {
    /// Print resolution: 1500×2100 (5×7 in at 300 DPI).
    pub fn print() -> Self {
        Self {
            width: PRINT_WIDTH,
            height: PRINT_HEIGHT,
            scale: PRINT_SCALE,
        }
    }

    /// Screen preview at the 96-DPI reference size.
    pub fn preview() -> Self {
        Self {
            width: 480,
            height: 672,
            scale: 1.0,
        }
    }

    /// Scales a reference length to device pixels.
    pub fn px(&self, reference: f32) -> i32 {
        (reference * self.scale).round() as i32
    }

    /// Scales a reference length to device pixels, clamped non-negative.
    pub fn upx(&self, reference: f32) -> u32 {
        self.px(reference).max(0) as u32
    }

    pub(crate) fn margin(&self) -> i32 {
        self.px(REF_MARGIN)
    }

    pub(crate) fn content_width(&self) -> i32 {
        self.width as i32 - 2 * self.margin()
    }
}

/// Per-render context threaded through the stages.
pub(crate) struct Frame<'a> {
    pub canvas: RgbaImage,
    pub spec: CanvasSpec,
    pub event: &'a EventRenderInput,
    pub guest: &'a GuestRenderInput,
    pub fonts: &'a FontResolver,
}

impl Frame<'_> {
    pub(crate) fn theme(&self) -> &crate::theme::ThemeSettings {
        &self.event.theme
    }

    pub(crate) fn primary(&self) -> Rgb<u8> {
        color::hex_to_rgb(&self.event.theme.colors.primary)
    }

    pub(crate) fn secondary(&self) -> Rgb<u8> {
        color::hex_to_rgb(&self.event.theme.colors.secondary)
    }

    pub(crate) fn accent(&self) -> Rgb<u8> {
        color::hex_to_rgb(&self.event.theme.colors.accent)
    }

    pub(crate) fn background(&self) -> Rgb<u8> {
        color::hex_to_rgb(&self.event.theme.colors.background)
    }
}

/// Outcome of one guest's render.
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub success: bool,
    /// Encoded invitation card, 1500×2100.
    pub card_png: Option<Vec<u8>>,
    /// Encoded standalone QR code, 300×300.
    pub qr_png: Option<Vec<u8>>,
    /// Failure detail when `success` is false.
    pub error: Option<String>,
}

/// Renders invitation cards for `(event, guest)` pairs.
///
/// The renderer holds no mutable state across calls apart from the shared
/// font cache, so one instance can serve concurrent renders on independent
/// inputs.
pub struct CardRenderer {
    fonts: FontResolver,
    spec: CanvasSpec,
    motif_seed: Option<u64>,
}

impl CardRenderer {
    /// Creates a print-resolution renderer over the given font resolver.
    pub fn new(fonts: FontResolver) -> Self {
        Self {
            fonts,
            spec: CanvasSpec::print(),
            motif_seed: None,
        }
    }

    /// Overrides the output canvas (e.g. [`CanvasSpec::preview`]).
    pub fn with_spec(mut self, spec: CanvasSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Pins decorative-motif placement to a fixed seed. Without this, every
    /// card draws a fresh entropy seed.
    pub fn with_motif_seed(mut self, seed: u64) -> Self {
        self.motif_seed = Some(seed);
        self
    }

    pub fn spec(&self) -> CanvasSpec {
        self.spec
    }

    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    /// Composites the invitation card raster. Never fails: stage errors are
    /// absorbed at the stage boundary and the dimensions are invariant.
    pub fn render_card(&self, event: &EventRenderInput, guest: &GuestRenderInput) -> RgbaImage {
        let spec = self.spec;
        let mut frame = Frame {
            canvas: RgbaImage::from_pixel(spec.width, spec.height, Rgba([255, 255, 255, 255])),
            spec,
            event,
            guest,
            fonts: &self.fonts,
        };
        let mut rng = match self.motif_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        stage("background", frame::paint_background(&mut frame));
        stage("border", frame::paint_border(&mut frame));

        let mut y = stage_y(
            "header",
            sections::paint_header(&mut frame),
            spec.px(96.0),
        );
        y = stage_y(
            "guest",
            sections::paint_guest_panel(&mut frame, y),
            y + spec.px(69.0),
        );
        y = stage_y(
            "message",
            sections::paint_message(&mut frame, y),
            y + spec.px(44.0),
        );
        y = stage_y(
            "details",
            sections::paint_details_panel(&mut frame, y),
            y + spec.px(125.0),
        );
        y = stage_y(
            "qr",
            qr_block::paint(&mut frame, y),
            y + spec.px(170.0),
        );

        stage("motifs", frame::paint_motifs(&mut frame, &mut rng));
        stage("footer", sections::paint_footer(&mut frame, y));

        debug!(
            event = event.id,
            guest = guest.id,
            width = frame.canvas.width(),
            height = frame.canvas.height(),
            "card composited"
        );
        frame.canvas
    }

    /// Renders and encodes both artifacts for a guest.
    ///
    /// Reports success through the result rather than an error: encoding
    /// failures are captured into `error` and whatever artifact did encode
    /// is still returned.
    pub fn generate(&self, event: &EventRenderInput, guest: &GuestRenderInput) -> RenderResult {
        let card = self.render_card(event, guest);

        let payload = identity_payload(event.id, guest.id, &guest.qr_code);
        let qr_img = qr::render_qr(
            &payload,
            STANDALONE_QR_SIZE,
            color::hex_to_rgb(&event.theme.colors.primary),
            Rgb([255, 255, 255]),
        );

        let card_png = artifact::encode_png(&card);
        let qr_png = artifact::encode_png(&qr_img);
        match (card_png, qr_png) {
            (Ok(card_png), Ok(qr_png)) => RenderResult {
                success: true,
                card_png: Some(card_png),
                qr_png: Some(qr_png),
                error: None,
            },
            (card_png, qr_png) => {
                let detail = [card_png.as_ref().err(), qr_png.as_ref().err()]
                    .into_iter()
                    .flatten()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                error!(
                    event = event.id,
                    guest = guest.id,
                    %detail,
                    "artifact encoding failed"
                );
                RenderResult {
                    success: false,
                    card_png: card_png.ok(),
                    qr_png: qr_png.ok(),
                    error: Some(detail),
                }
            }
        }
    }
}

// Stage boundary for stages without a cursor.
fn stage(name: &str, result: Result<(), RenderError>) {
    if let Err(err) = result {
        warn!(stage = name, %err, "stage failed, continuing");
    }
}

// Stage boundary for cursor-producing stages: on failure the pipeline
// continues at a nominal offset so later sections still land sensibly.
fn stage_y(name: &str, result: Result<i32, RenderError>, fallback: i32) -> i32 {
    match result {
        Ok(y) => y,
        Err(err) => {
            warn!(stage = name, %err, "stage failed, continuing at fallback offset");
            fallback
        }
    }
}
