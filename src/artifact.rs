//! Artifact serialization and deterministic naming.
//!
//! Cards carry fine text, so serialization is lossless PNG only. Filenames
//! are derived from stable identifiers plus a sanitized guest name and are
//! reproducible across renders.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::RenderError;

/// Encodes a raster losslessly as PNG.
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(
        raster.as_raw(),
        raster.width(),
        raster.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Filename for a guest's invitation card.
///
/// Whitespace and path separators in the guest name become underscores;
/// everything else (apostrophes, accents) is preserved.
pub fn card_filename(event_id: i64, guest_id: i64, full_name: &str) -> String {
    format!(
        "invitation_{event_id}_{guest_id}_{}.png",
        sanitize_name(full_name)
    )
}

/// Filename for a guest's standalone QR code.
pub fn qr_filename(guest_id: i64) -> String {
    format!("qr_{guest_id}.png")
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn card_filename_sanitizes_whitespace_only() {
        assert_eq!(
            card_filename(7, 9, "Jane O'Brien Smith"),
            "invitation_7_9_Jane_O'Brien_Smith.png"
        );
    }

    #[test]
    fn card_filename_replaces_path_separators() {
        assert_eq!(
            card_filename(1, 2, "a/b\\c"),
            "invitation_1_2_a_b_c.png"
        );
    }

    #[test]
    fn qr_filename_format() {
        assert_eq!(qr_filename(42), "qr_42.png");
    }

    #[test]
    fn png_round_trips_dimensions() {
        let img = RgbaImage::from_pixel(12, 34, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert!(!bytes.is_empty());
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 34));
    }
}
