//! QR symbol rendering.
//!
//! Payloads are encoded at error-correction level High with the standard
//! 4-module quiet zone, painted at a fixed module size, then resampled to
//! the requested output size with a Lanczos filter. Nearest-neighbor would
//! alias badly enough to break scanners at small sizes, so it is never used
//! here.

use image::{Rgb, Rgba, RgbaImage, imageops};
use qrcode::{Color as Module, EcLevel, QrCode};
use tracing::error;

use crate::error::RenderError;

const MODULE_PX: u32 = 10;
const QUIET_MODULES: u32 = 4;

/// Renders `payload` as a `size_px`-square QR raster.
///
/// Total: an encoding failure (which should not happen for well-formed
/// payloads under the symbol's capacity) logs at error level and yields a
/// blank canvas in the background color instead.
pub fn render_qr(payload: &str, size_px: u32, fg: Rgb<u8>, bg: Rgb<u8>) -> RgbaImage {
    let size_px = size_px.max(1);
    match try_render(payload, size_px, fg, bg) {
        Ok(img) => img,
        Err(err) => {
            error!(%err, payload_len = payload.len(), "QR payload failed to encode");
            blank(size_px, bg)
        }
    }
}

fn try_render(
    payload: &str,
    size_px: u32,
    fg: Rgb<u8>,
    bg: Rgb<u8>,
) -> Result<RgbaImage, RenderError> {
    let code = QrCode::with_error_correction_level(payload, EcLevel::H)
        .map_err(|err| RenderError::Encoding(err.to_string()))?;

    let modules = code.to_colors();
    let symbol_width = code.width() as u32;
    let total_modules = symbol_width + QUIET_MODULES * 2;
    let raw_size = total_modules * MODULE_PX;

    let fg = Rgba([fg[0], fg[1], fg[2], 255]);
    let mut raw = RgbaImage::from_pixel(raw_size, raw_size, Rgba([bg[0], bg[1], bg[2], 255]));
    for (i, module) in modules.iter().enumerate() {
        if *module != Module::Dark {
            continue;
        }
        let mx = (i as u32 % symbol_width + QUIET_MODULES) * MODULE_PX;
        let my = (i as u32 / symbol_width + QUIET_MODULES) * MODULE_PX;
        for dy in 0..MODULE_PX {
            for dx in 0..MODULE_PX {
                raw.put_pixel(mx + dx, my + dy, fg);
            }
        }
    }

    if raw_size == size_px {
        Ok(raw)
    } else {
        Ok(imageops::resize(
            &raw,
            size_px,
            size_px,
            imageops::FilterType::Lanczos3,
        ))
    }
}

fn blank(size_px: u32, bg: Rgb<u8>) -> RgbaImage {
    RgbaImage::from_pixel(size_px, size_px, Rgba([bg[0], bg[1], bg[2], 255]))
}
