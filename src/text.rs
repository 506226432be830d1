//! Text measurement, wrapping, shrink-to-fit sizing, and glyph drawing.

use std::collections::VecDeque;

use image::{Rgba, RgbaImage};
use rusttype::{Scale, point};

use crate::draw;
use crate::font::{FontHandle, builtin};

/// Measured advance width of a single line of text, in pixels.
pub fn measure_width(font: &FontHandle, text: &str) -> f32 {
    match font {
        FontHandle::Outline { font, size } => {
            if text.is_empty() {
                return 0.0;
            }
            let scale = Scale::uniform(*size);
            let v_metrics = font.v_metrics(scale);
            let mut width = 0.0f32;
            for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
                let advance = glyph.unpositioned().h_metrics().advance_width;
                width = glyph.position().x + advance;
                if let Some(bb) = glyph.pixel_bounding_box() {
                    width = width.max(bb.max.x as f32);
                }
            }
            width
        }
        FontHandle::Builtin { size } => builtin::measure(text, *size),
    }
}

/// Greedy word wrap against a pixel-width budget.
///
/// Words are pulled onto the current line while the measured line still
/// fits. A single word wider than the budget gets its own line, unshortened;
/// there is no hyphenation or truncation. Empty input yields no lines.
pub fn wrap(text: &str, font: &FontHandle, max_width_px: f32) -> Vec<String> {
    let mut words: VecDeque<&str> = text.split_whitespace().collect();
    let mut lines = Vec::new();
    while let Some(first) = words.pop_front() {
        let mut line = first.to_string();
        while let Some(next) = words.front() {
            let candidate = format!("{line} {next}");
            if measure_width(font, &candidate) <= max_width_px {
                line = candidate;
                words.pop_front();
            } else {
                break;
            }
        }
        lines.push(line);
    }
    lines
}

/// Bounds for the shrink-to-fit loop.
#[derive(Debug, Clone, Copy)]
pub struct ShrinkOptions {
    /// Smallest size the loop will try.
    pub min_size: f32,
    /// Size decrement per attempt.
    pub step: f32,
    /// Attempt budget; the loop always terminates within this many steps.
    pub max_attempts: u32,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            min_size: 8.0,
            step: 2.0,
            max_attempts: 12,
        }
    }
}

/// Shrinks the font until `text` fits `max_width_px` on a single line, or
/// the attempt budget runs out.
///
/// Never fails: if the budget is exhausted without fitting, the last tried
/// font and its measured width are returned as-is.
pub fn shrink_to_fit(
    text: &str,
    font: &FontHandle,
    max_width_px: f32,
    opts: ShrinkOptions,
) -> (FontHandle, f32) {
    let mut current = font.clone();
    let mut width = measure_width(&current, text);
    let mut attempts = 0;
    while width > max_width_px
        && attempts < opts.max_attempts
        && current.size() - opts.step >= opts.min_size
    {
        current = current.with_size(current.size() - opts.step);
        width = measure_width(&current, text);
        attempts += 1;
    }
    (current, width)
}

/// Draws a line of text with its top-left corner at `(x, y)`.
///
/// Glyph coverage is alpha-blended onto the canvas; the color's own alpha
/// modulates the coverage.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &FontHandle,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    match font {
        FontHandle::Outline { font, size } => {
            let scale = Scale::uniform(*size);
            let v_metrics = font.v_metrics(scale);
            // Callers position by the top of the line; rusttype wants the
            // baseline.
            let baseline = y as f32 + v_metrics.ascent;
            for glyph in font.layout(text, scale, point(x as f32, baseline)) {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || py < 0 {
                        return;
                    }
                    let alpha = (coverage * color[3] as f32) as u8;
                    if alpha == 0 {
                        return;
                    }
                    draw::blend_pixel(
                        canvas,
                        px as u32,
                        py as u32,
                        Rgba([color[0], color[1], color[2], alpha]),
                    );
                });
            }
        }
        FontHandle::Builtin { size } => builtin::draw(canvas, text, x, y, *size, color),
    }
}

/// Draws text with a solid offset shadow beneath the fill pass.
pub fn draw_text_with_shadow(
    canvas: &mut RgbaImage,
    font: &FontHandle,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    shadow: Rgba<u8>,
    offset: (i32, i32),
    text: &str,
) {
    draw_text(canvas, font, x + offset.0, y + offset.1, shadow, text);
    draw_text(canvas, font, x, y, color, text);
}

/// Draws text horizontally centered on the canvas. Returns the measured
/// width so callers can position decorations around it.
pub fn draw_text_centered(
    canvas: &mut RgbaImage,
    font: &FontHandle,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) -> f32 {
    let width = measure_width(font, text);
    let x = ((canvas.width() as f32 - width) / 2.0) as i32;
    draw_text(canvas, font, x, y, color, text);
    width
}
