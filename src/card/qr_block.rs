//! Stage 7: the centered QR block.

use image::{Rgb, Rgba};

use super::{Frame, sections};
use crate::color;
use crate::draw;
use crate::error::RenderError;
use crate::input::identity_payload;
use crate::qr;
use crate::text;

/// Paints the optional concentric-circle backdrop, the framed QR symbol,
/// and the two instruction lines. Returns the cursor below the block.
pub(crate) fn paint(frame: &mut Frame, y: i32) -> Result<i32, RenderError> {
    let spec = frame.spec;
    let primary = frame.primary();
    let secondary = color::with_alpha(frame.secondary(), 255);

    let qr_size = spec.upx(128.0);
    let qr_x = (spec.width as i32 - qr_size as i32) / 2;
    let qr_y = y;

    if frame.theme().decorations.show_qr_background {
        let center_x = qr_x + qr_size as i32 / 2;
        let center_y = qr_y + qr_size as i32 / 2;
        let base_radius = qr_size as i32 / 2 + spec.px(8.0);
        for ring in 0..3 {
            draw::stroke_circle(
                &mut frame.canvas,
                center_x,
                center_y,
                base_radius + ring * spec.px(5.0),
                spec.px(0.7).max(1),
                secondary,
            );
        }
    }

    let payload = identity_payload(frame.event.id, frame.guest.id, &frame.guest.qr_code);
    let qr_img = qr::render_qr(&payload, qr_size, primary, Rgb([255, 255, 255]));

    let border = spec.px(2.5);
    draw::fill_rect(
        &mut frame.canvas,
        qr_x - border,
        qr_y - border,
        qr_size as i32 + 2 * border,
        qr_size as i32 + 2 * border,
        color::with_alpha(primary, 255),
    );
    draw::composite_over(&mut frame.canvas, &qr_img, qr_x, qr_y);

    let font = frame.fonts.resolve(&frame.theme().fonts.body, spec.upx(11.0));
    let gray = Rgba([100, 100, 100, 255]);
    let mut cursor = qr_y + qr_size as i32 + spec.px(10.0);
    for line in sections::instruction_lines() {
        text::draw_text_centered(&mut frame.canvas, &font, cursor, gray, line);
        cursor += spec.px(13.0);
    }
    Ok(cursor + spec.px(6.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CanvasSpec;
    use crate::font::FontResolver;
    use crate::input::{EventRenderInput, GuestRenderInput};
    use crate::theme::ThemeSettings;
    use chrono::NaiveDate;
    use image::RgbaImage;

    fn fixtures(theme: ThemeSettings) -> (EventRenderInput, GuestRenderInput) {
        let event = EventRenderInput {
            id: 4,
            title: "Launch".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            venue: "Atrium".into(),
            organizer_email: "e@example.com".into(),
            theme,
            background_image: None,
        };
        let guest = GuestRenderInput {
            id: 8,
            title: "Ms".into(),
            full_name: "Zawadi K".into(),
            email: "z@example.com".into(),
            phone: None,
            custom_message: None,
            seat_number: None,
            table_number: None,
            qr_code: "aa-bb".into(),
        };
        (event, guest)
    }

    fn preview_frame<'a>(
        event: &'a EventRenderInput,
        guest: &'a GuestRenderInput,
        fonts: &'a FontResolver,
    ) -> Frame<'a> {
        let spec = CanvasSpec::preview();
        Frame {
            canvas: RgbaImage::from_pixel(spec.width, spec.height, Rgba([255, 255, 255, 255])),
            spec,
            event,
            guest,
            fonts,
        }
    }

    #[test]
    fn qr_block_paints_the_frame_and_symbol() {
        let mut theme = ThemeSettings::default();
        theme.colors.primary = "#000000".into();
        let (event, guest) = fixtures(theme);
        let fonts = FontResolver::new(Vec::new());
        let mut frame = preview_frame(&event, &guest, &fonts);

        let next = paint(&mut frame, 100).unwrap();
        assert!(next > 100 + frame.spec.px(128.0));

        // The frame border above the symbol is solid primary.
        let qr_size = frame.spec.upx(128.0);
        let qr_x = (frame.spec.width as i32 - qr_size as i32) / 2;
        let border = frame.spec.px(2.5);
        let probe_y = (100 - border + 1) as u32;
        assert_eq!(
            frame.canvas.get_pixel((qr_x + qr_size as i32 / 2) as u32, probe_y).0,
            [0, 0, 0, 255]
        );
    }

    #[test]
    fn qr_backdrop_circles_toggle() {
        let mut with_theme = ThemeSettings::default();
        with_theme.colors.secondary = "#00ff00".into();
        let (event_a, guest) = fixtures(with_theme.clone());
        let fonts = FontResolver::new(Vec::new());
        let mut a = preview_frame(&event_a, &guest, &fonts);
        paint(&mut a, 100).unwrap();

        let mut without_theme = with_theme;
        without_theme.decorations.show_qr_background = false;
        let (event_b, guest_b) = fixtures(without_theme);
        let mut b = preview_frame(&event_b, &guest_b, &fonts);
        paint(&mut b, 100).unwrap();

        assert_ne!(a.canvas.as_raw(), b.canvas.as_raw());
    }
}
