//! Vertical-flow text sections: header, guest panel, message, details
//! panel, and footer.
//!
//! Each stage takes the current y cursor and returns the cursor for the
//! next section. Text that might overflow its box goes through the bounded
//! shrink-to-fit loop; nothing here is allowed to fail a render.

use image::{Rgb, Rgba};

use super::Frame;
use crate::color;
use crate::draw;
use crate::error::RenderError;
use crate::text::{self, ShrinkOptions};

const DEFAULT_GREETING: &str =
    "You are cordially invited to join us for a celebration of love and joy";

const INSTRUCTION_LINES: [&str; 2] = [
    "Scan this QR code to confirm your attendance",
    "or check in at the event",
];

/// Stage 3: header band with the upper-cased event title.
pub(crate) fn paint_header(frame: &mut Frame) -> Result<i32, RenderError> {
    let spec = frame.spec;
    let primary = frame.primary();
    let secondary = frame.secondary();

    let band_height = spec.px(76.0);
    draw::vertical_gradient(&mut frame.canvas, 0, band_height, primary, secondary);

    let title = frame.event.title.to_uppercase();
    let base = frame.fonts.resolve(&frame.theme().fonts.title, spec.upx(26.0));
    let (font, width) = text::shrink_to_fit(
        &title,
        &base,
        spec.content_width() as f32,
        ShrinkOptions::default(),
    );
    let x = ((spec.width as f32 - width) / 2.0) as i32;
    let y = spec.px(22.0);
    let shadow_offset = spec.px(1.0).max(1);
    text::draw_text_with_shadow(
        &mut frame.canvas,
        &font,
        x,
        y,
        Rgba([255, 255, 255, 255]),
        Rgba([0, 0, 0, 150]),
        (shadow_offset, shadow_offset),
        &title,
    );

    let divider_y = y + font.size() as i32 + spec.px(6.0);
    let half_length = spec.px(33.0);
    let center_x = spec.width as i32 / 2;
    draw::hline(
        &mut frame.canvas,
        center_x - half_length,
        center_x + half_length,
        divider_y,
        spec.px(1.0).max(1),
        Rgba([255, 255, 255, 180]),
    );
    Ok(divider_y + spec.px(10.0))
}

/// Stage 4: rounded guest panel with the shrink-to-fit display name.
pub(crate) fn paint_guest_panel(frame: &mut Frame, y: i32) -> Result<i32, RenderError> {
    let spec = frame.spec;
    let secondary = color::with_alpha(frame.secondary(), 255);
    let accent = color::with_alpha(frame.accent(), 255);
    let margin = spec.margin();
    let panel_height = spec.px(56.0);

    draw::fill_rounded_rect(
        &mut frame.canvas,
        margin,
        y,
        spec.content_width(),
        panel_height,
        spec.px(10.0),
        secondary,
    );

    let name = frame.guest.display_name();
    let base = frame.fonts.resolve(&frame.theme().fonts.name, spec.upx(28.0));
    let budget = (spec.content_width() - spec.px(32.0)) as f32;
    let (font, width) = text::shrink_to_fit(&name, &base, budget, ShrinkOptions::default());
    let x = ((spec.width as f32 - width) / 2.0) as i32;
    let text_y = y + (panel_height - font.size() as i32) / 2;
    let shadow_offset = spec.px(0.8).max(1);
    text::draw_text_with_shadow(
        &mut frame.canvas,
        &font,
        x,
        text_y,
        accent,
        Rgba([0, 0, 0, 50]),
        (shadow_offset, shadow_offset),
        &name,
    );

    let underline_y = text_y + font.size() as i32 + spec.px(2.0);
    draw::hline(
        &mut frame.canvas,
        x - spec.px(6.0),
        x + width as i32 + spec.px(6.0),
        underline_y,
        spec.px(0.7).max(1),
        accent,
    );
    Ok(y + panel_height + spec.px(13.0))
}

/// Stage 5: the guest's custom message, or the default greeting.
pub(crate) fn paint_message(frame: &mut Frame, y: i32) -> Result<i32, RenderError> {
    let spec = frame.spec;
    let accent = color::with_alpha(frame.accent(), 255);
    let font = frame.fonts.resolve(&frame.theme().fonts.body, spec.upx(14.0));

    let message = frame
        .guest
        .custom_message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_GREETING);

    let budget = (spec.content_width() - spec.px(13.0)) as f32;
    let pitch = font.size() as i32 + spec.px(3.0);
    let mut cursor = y;
    for line in text::wrap(message, &font, budget) {
        text::draw_text_centered(&mut frame.canvas, &font, cursor, accent, &line);
        cursor += pitch;
    }
    Ok(cursor + spec.px(10.0))
}

/// Stage 6: shadowed white details card listing date, time, venue, and any
/// seat/table assignment.
pub(crate) fn paint_details_panel(frame: &mut Frame, y: i32) -> Result<i32, RenderError> {
    let spec = frame.spec;
    let primary = frame.primary();
    let margin = spec.margin();
    let panel_width = spec.content_width();
    let panel_height = spec.px(112.0);
    let radius = spec.px(8.0);

    // Drop shadow: an offset darker duplicate beneath the card.
    let shadow_offset = spec.px(2.5);
    let shadow = color::with_alpha(color::darken(Rgb([255, 255, 255]), 0.22), 255);
    draw::fill_rounded_rect(
        &mut frame.canvas,
        margin + shadow_offset,
        y + shadow_offset,
        panel_width,
        panel_height,
        radius,
        shadow,
    );
    draw::fill_rounded_rect(
        &mut frame.canvas,
        margin,
        y,
        panel_width,
        panel_height,
        radius,
        Rgba([255, 255, 255, 255]),
    );
    draw::stroke_rounded_rect(
        &mut frame.canvas,
        margin,
        y,
        panel_width,
        panel_height,
        radius,
        spec.px(1.0).max(1),
        color::with_alpha(primary, 255),
    );

    let font = frame.fonts.resolve(&frame.theme().fonts.body, spec.upx(13.0));
    let mut details: Vec<(&str, String)> = vec![
        (
            "\u{1F4C5}",
            format!("Date: {}", frame.event.date.format("%A, %d %B %Y")),
        ),
        (
            "\u{1F552}",
            format!("Time: {}", frame.event.date.format("%I:%M %p")),
        ),
        ("\u{1F4CD}", format!("Venue: {}", frame.event.venue)),
    ];
    if let Some(seat) = frame.guest.seat_number.as_deref().filter(|s| !s.is_empty()) {
        details.push(("\u{1F4BA}", format!("Seat: {seat}")));
    }
    if let Some(table) = frame.guest.table_number.as_deref().filter(|t| !t.is_empty()) {
        details.push(("\u{1F37D}", format!("Table: {table}")));
    }

    let icon_x = margin + spec.px(20.0);
    let step = spec.px(18.0);
    let text_color = Rgba([50, 50, 50, 255]);
    let icon_color = color::with_alpha(primary, 255);
    let mut line_y = y + spec.px(16.0);
    for (icon, line) in &details {
        // Emoji glyphs are best effort; a face without them degrades to a
        // box or nothing, and the label still reads.
        text::draw_text(&mut frame.canvas, &font, icon_x, line_y, icon_color, icon);
        let icon_width = text::measure_width(&font, icon).max(spec.px(8.0) as f32);
        text::draw_text(
            &mut frame.canvas,
            &font,
            icon_x + icon_width as i32 + spec.px(5.0),
            line_y,
            text_color,
            line,
        );
        line_y += step;
    }
    Ok(y + panel_height + spec.px(13.0))
}

/// QR instruction copy shared with the QR block stage.
pub(crate) fn instruction_lines() -> [&'static str; 2] {
    INSTRUCTION_LINES
}

/// Stage 9: three fixed footer lines in the secondary color.
pub(crate) fn paint_footer(frame: &mut Frame, y: i32) -> Result<(), RenderError> {
    let spec = frame.spec;
    let secondary = color::with_alpha(frame.secondary(), 255);
    let font = frame.fonts.resolve(&frame.theme().fonts.body, spec.upx(9.0));
    let step = spec.px(11.0);

    let lines = [
        format!("For inquiries, contact: {}", frame.event.organizer_email),
        "We look forward to celebrating with you!".to_string(),
        format!(
            "Event ID: {} | Guest ID: {}",
            frame.event.id, frame.guest.id
        ),
    ];

    // Clamp so a long message upstream cannot push the footer off-canvas.
    let max_start = spec.height as i32 - 3 * step - spec.px(8.0);
    let mut cursor = y.min(max_start);
    for line in &lines {
        text::draw_text_centered(&mut frame.canvas, &font, cursor, secondary, line);
        cursor += step;
    }
    Ok(())
}
