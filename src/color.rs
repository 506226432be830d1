//! Color conversion and blending helpers.
//!
//! Theme colors arrive as hex strings from the event record; everything the
//! pipeline draws with goes through the converters here. A malformed color
//! never fails a render: it falls back to the brand purple and is logged as
//! a data-quality issue.

use image::{Rgb, Rgba};
use palette::{Hsl, IntoColor, Srgb};
use tracing::warn;

/// Fallback used whenever a theme hex string cannot be parsed (`#7C3AED`).
pub const FALLBACK_RGB: Rgb<u8> = Rgb([124, 58, 237]);

/// Parses a 3-, 6-, or 8-digit hex color, with or without a leading `#`.
///
/// The alpha channel of an 8-digit color is ignored. Invalid input returns
/// [`FALLBACK_RGB`] instead of failing, so callers can keep rendering.
pub fn hex_to_rgb(hex: &str) -> Rgb<u8> {
    match parse_hex(hex.trim()) {
        Some(rgb) => rgb,
        None => {
            warn!(color = hex, "unparseable theme color, using fallback");
            FALLBACK_RGB
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                out[i] = c.to_digit(16)? as u8 * 17;
            }
            Some(Rgb(out))
        }
        // The 8-digit form carries alpha in the last two digits; the RGB
        // result drops it.
        6 | 8 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some(Rgb([r, g, b]))
        }
        _ => None,
    }
}

/// Formats a color as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Picks white or black text for the given background.
///
/// Uses perceptual luminance `L = 0.299r + 0.587g + 0.114b`; backgrounds
/// below 0.5 get white text, everything else black.
pub fn contrast_of(rgb: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = rgb.0;
    let luminance = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    if luminance < 0.5 {
        Rgb([255, 255, 255])
    } else {
        Rgb([0, 0, 0])
    }
}

/// Alpha-over blend of a translucent foreground onto an opaque background,
/// integer-truncated per channel.
pub fn composite_over(fg: Rgba<u8>, bg: Rgb<u8>) -> Rgb<u8> {
    let alpha = fg[3] as f32 / 255.0;
    let channel = |f: u8, b: u8| (f as f32 * alpha + b as f32 * (1.0 - alpha)) as u8;
    Rgb([
        channel(fg[0], bg[0]),
        channel(fg[1], bg[1]),
        channel(fg[2], bg[2]),
    ])
}

/// Per-channel linear blend, `t` in `[0, 1]`. Used for gradient scanlines.
pub fn mix(a: Rgb<u8>, b: Rgb<u8>, t: f32) -> Rgb<u8> {
    let channel = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
    Rgb([
        channel(a[0], b[0]),
        channel(a[1], b[1]),
        channel(a[2], b[2]),
    ])
}

/// Darkens a color by reducing its HSL lightness.
pub fn darken(rgb: Rgb<u8>, amount: f32) -> Rgb<u8> {
    let srgb = Srgb::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    );
    let mut hsl: Hsl = srgb.into_color();
    hsl.lightness = (hsl.lightness - amount).max(0.0);
    let darkened: Srgb = hsl.into_color();
    Rgb([
        (darkened.red * 255.0).round() as u8,
        (darkened.green * 255.0).round() as u8,
        (darkened.blue * 255.0).round() as u8,
    ])
}

/// Attaches an alpha channel to an opaque color.
pub fn with_alpha(rgb: Rgb<u8>, alpha: u8) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], alpha])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_round_trip() {
        for hex in ["#000000", "#ffffff", "#7c3aed", "#852d63", "#0f1e2d"] {
            assert_eq!(rgb_to_hex(hex_to_rgb(hex)), hex);
        }
    }

    #[test]
    fn case_normalized_round_trip() {
        assert_eq!(rgb_to_hex(hex_to_rgb("#7C3AED")), "#7c3aed");
        assert_eq!(rgb_to_hex(hex_to_rgb("7C3AED")), "#7c3aed");
    }

    #[test]
    fn three_digit_expansion() {
        assert_eq!(hex_to_rgb("#fff"), Rgb([255, 255, 255]));
        assert_eq!(hex_to_rgb("#a2c"), Rgb([170, 34, 204]));
    }

    #[test]
    fn eight_digit_alpha_ignored() {
        assert_eq!(hex_to_rgb("#7C3AEDCC"), hex_to_rgb("#7C3AED"));
    }

    #[test]
    fn invalid_input_falls_back() {
        assert_eq!(hex_to_rgb("notacolor"), FALLBACK_RGB);
        assert_eq!(hex_to_rgb(""), FALLBACK_RGB);
        assert_eq!(hex_to_rgb("#12345"), FALLBACK_RGB);
        assert_eq!(hex_to_rgb("#gggggg"), FALLBACK_RGB);
    }

    #[test]
    fn fallback_matches_brand_purple() {
        assert_eq!(hex_to_rgb("#7C3AED"), FALLBACK_RGB);
    }

    #[test]
    fn contrast_thresholds() {
        assert_eq!(contrast_of(Rgb([0, 0, 0])), Rgb([255, 255, 255]));
        assert_eq!(contrast_of(Rgb([255, 255, 255])), Rgb([0, 0, 0]));
        // Dark theme purple wants white text.
        assert_eq!(contrast_of(FALLBACK_RGB), Rgb([255, 255, 255]));
    }

    #[test]
    fn composite_over_endpoints() {
        let bg = Rgb([10, 20, 30]);
        assert_eq!(composite_over(Rgba([200, 100, 50, 255]), bg), Rgb([200, 100, 50]));
        assert_eq!(composite_over(Rgba([200, 100, 50, 0]), bg), bg);
    }

    #[test]
    fn composite_over_truncates() {
        // 50% of 255 over 0 is 127.5, truncated to 127.
        let out = composite_over(Rgba([255, 255, 255, 128]), Rgb([0, 0, 0]));
        assert_eq!(out, Rgb([128, 128, 128]));
    }

    #[test]
    fn mix_endpoints() {
        let a = Rgb([0, 100, 200]);
        let b = Rgb([255, 0, 100]);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
    }

    #[test]
    fn darken_reduces_brightness() {
        let original = Rgb([200, 100, 100]);
        let darkened = darken(original, 0.2);
        let sum = |c: Rgb<u8>| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(sum(darkened) < sum(original));
    }
}
