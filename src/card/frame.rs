//! Full-canvas stages: background, border, and decorative motifs.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rand::Rng;
use rand::rngs::StdRng;

use super::Frame;
use crate::color;
use crate::draw;
use crate::error::RenderError;
use crate::theme::BorderStyle;

// Opacity applied to a configured background image.
const BACKGROUND_IMAGE_ALPHA: f32 = 0.3;

const MOTIF_COUNT: usize = 12;

/// Stage 1: solid background, optional gradient toward the secondary color,
/// optional faded background image.
pub(crate) fn paint_background(frame: &mut Frame) -> Result<(), RenderError> {
    let spec = frame.spec;
    let bg = frame.background();
    let secondary = frame.secondary();

    for pixel in frame.canvas.pixels_mut() {
        *pixel = Rgba([bg[0], bg[1], bg[2], 255]);
    }

    if frame.theme().decorations.gradient_background {
        draw::vertical_gradient(&mut frame.canvas, 0, spec.height as i32, bg, secondary);
    }

    if let Some(path) = frame.event.background_image.as_deref() {
        // Optional visual element: an unreadable image skips the overlay
        // (the solid fill and gradient above already painted) and reports
        // through the stage boundary.
        let img = image::open(path).map_err(|err| {
            RenderError::ResourceUnavailable(format!(
                "background image {}: {err}",
                path.display()
            ))
        })?;
        let mut overlay: RgbaImage =
            imageops::resize(&img.to_rgba8(), spec.width, spec.height, FilterType::Lanczos3);
        for pixel in overlay.pixels_mut() {
            pixel[3] = (pixel[3] as f32 * BACKGROUND_IMAGE_ALPHA) as u8;
        }
        draw::composite_over(&mut frame.canvas, &overlay, 0, 0);
    }
    Ok(())
}

/// Stage 2: border per the theme's style. No-op when borders are off.
pub(crate) fn paint_border(frame: &mut Frame) -> Result<(), RenderError> {
    let decorations = frame.theme().decorations;
    if !decorations.show_border {
        return Ok(());
    }
    let spec = frame.spec;
    let primary = color::with_alpha(frame.primary(), 255);
    let secondary = color::with_alpha(frame.secondary(), 255);
    let (w, h) = (spec.width as i32, spec.height as i32);

    match decorations.border_style {
        BorderStyle::Simple => {
            let inset = spec.px(5.0);
            let stroke = spec.px(1.5).max(1);
            draw::stroke_rect(
                &mut frame.canvas,
                inset,
                inset,
                w - 2 * inset,
                h - 2 * inset,
                stroke,
                primary,
            );
        }
        BorderStyle::Rounded => {
            let inset = spec.px(5.0);
            draw::stroke_rounded_rect(
                &mut frame.canvas,
                inset,
                inset,
                w - 2 * inset,
                h - 2 * inset,
                spec.px(26.0),
                spec.px(5.0).max(1),
                primary,
            );
            let inner = spec.px(12.0);
            draw::stroke_rounded_rect(
                &mut frame.canvas,
                inner,
                inner,
                w - 2 * inner,
                h - 2 * inner,
                spec.px(22.0),
                spec.px(1.5).max(1),
                secondary,
            );
        }
        BorderStyle::Floral => {
            let pitch = spec.px(20.0).max(2);
            let radius = spec.px(5.0).max(1);
            let offset = spec.px(7.0);
            let stroke = spec.px(1.0).max(1);
            let mut x = offset + radius;
            while x < w - offset {
                draw::stroke_circle(&mut frame.canvas, x, offset + radius, radius, stroke, primary);
                draw::stroke_circle(&mut frame.canvas, x, h - offset - radius, radius, stroke, primary);
                x += pitch;
            }
            let mut y = offset + radius;
            while y < h - offset {
                draw::stroke_circle(&mut frame.canvas, offset + radius, y, radius, stroke, primary);
                draw::stroke_circle(&mut frame.canvas, w - offset - radius, y, radius, stroke, primary);
                y += pitch;
            }
        }
        BorderStyle::Geometric => {
            let base = spec.px(13.0).max(2);
            let depth = spec.px(5.0);
            let mut x = 0;
            let mut alternating = true;
            while x < w {
                if alternating {
                    draw::fill_triangle(
                        &mut frame.canvas,
                        [(x, 0), (x + base, 0), (x + base / 2, depth)],
                        primary,
                    );
                    draw::fill_triangle(
                        &mut frame.canvas,
                        [(x, h - 1), (x + base, h - 1), (x + base / 2, h - 1 - depth)],
                        primary,
                    );
                }
                alternating = !alternating;
                x += base;
            }
        }
    }
    Ok(())
}

/// Stage 8: random motifs confined to the four corner safe zones, colored
/// only from the theme palette.
pub(crate) fn paint_motifs(frame: &mut Frame, rng: &mut StdRng) -> Result<(), RenderError> {
    if !frame.theme().decorations.show_decorations {
        return Ok(());
    }
    let spec = frame.spec;
    let palette = [frame.primary(), frame.secondary(), frame.accent()];
    let (w, h) = (spec.width as i32, spec.height as i32);
    // Safe zones sized relative to the margin keep motifs off the text.
    let zone = spec.margin() * 4;
    let corners = [
        (0, 0),
        (w - zone, 0),
        (0, h - zone),
        (w - zone, h - zone),
    ];

    for _ in 0..MOTIF_COUNT {
        let (cx0, cy0) = corners[rng.gen_range(0..corners.len())];
        let size = rng.gen_range(spec.px(6.0)..=spec.px(20.0));
        let span = (zone - size).max(1);
        let x = cx0 + rng.gen_range(0..span);
        let y = cy0 + rng.gen_range(0..span);
        let rgb = palette[rng.gen_range(0..palette.len())];
        let rgba = color::with_alpha(rgb, rng.gen_range(60..=160));
        let half = size / 2;
        if rng.gen_bool(0.5) {
            draw::fill_circle(&mut frame.canvas, x + half, y + half, half, rgba);
        } else {
            draw::fill_diamond(&mut frame.canvas, x + half, y + half, half, rgba);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CanvasSpec;
    use crate::font::FontResolver;
    use crate::input::{EventRenderInput, GuestRenderInput};
    use crate::theme::ThemeSettings;
    use chrono::NaiveDate;
    use rand::SeedableRng;

    fn event(theme: ThemeSettings) -> EventRenderInput {
        EventRenderInput {
            id: 1,
            title: "Test Event".into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            venue: "Hall".into(),
            organizer_email: "o@example.com".into(),
            theme,
            background_image: None,
        }
    }

    fn guest() -> GuestRenderInput {
        GuestRenderInput {
            id: 2,
            title: "Mr".into(),
            full_name: "Test Guest".into(),
            email: "g@example.com".into(),
            phone: None,
            custom_message: None,
            seat_number: None,
            table_number: None,
            qr_code: "code".into(),
        }
    }

    fn preview_frame<'a>(
        event: &'a EventRenderInput,
        guest: &'a GuestRenderInput,
        fonts: &'a FontResolver,
    ) -> Frame<'a> {
        let spec = CanvasSpec::preview();
        Frame {
            canvas: image::RgbaImage::from_pixel(spec.width, spec.height, Rgba([255, 255, 255, 255])),
            spec,
            event,
            guest,
            fonts,
        }
    }

    #[test]
    fn gradient_background_blends_toward_secondary() {
        let mut theme = ThemeSettings::default();
        theme.colors.background = "#000000".into();
        theme.colors.secondary = "#ffffff".into();
        let event = event(theme);
        let guest = guest();
        let fonts = FontResolver::new(Vec::new());
        let mut frame = preview_frame(&event, &guest, &fonts);

        paint_background(&mut frame).unwrap();
        assert_eq!(frame.canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
        let bottom = frame.canvas.get_pixel(0, frame.spec.height - 1);
        assert!(bottom[0] > 220);
    }

    #[test]
    fn missing_background_image_reports_resource_error_after_painting() {
        let event_record = {
            let mut e = event(ThemeSettings::default());
            e.theme.colors.background = "#102030".into();
            e.theme.decorations.gradient_background = false;
            e.background_image = Some("/no/such/file.png".into());
            e
        };
        let guest = guest();
        let fonts = FontResolver::new(Vec::new());
        let mut frame = preview_frame(&event_record, &guest, &fonts);

        let err = paint_background(&mut frame).unwrap_err();
        assert!(matches!(err, RenderError::ResourceUnavailable(_)));
        // The solid fill already landed before the overlay failed.
        assert_eq!(frame.canvas.get_pixel(0, 0).0, [16, 32, 48, 255]);
    }

    #[test]
    fn simple_border_paints_the_outline() {
        let mut theme = ThemeSettings::default();
        theme.decorations.border_style = BorderStyle::Simple;
        theme.colors.primary = "#ff0000".into();
        let event = event(theme);
        let guest = guest();
        let fonts = FontResolver::new(Vec::new());
        let mut frame = preview_frame(&event, &guest, &fonts);

        paint_border(&mut frame).unwrap();
        let inset = frame.spec.px(5.0) as u32;
        assert_eq!(frame.canvas.get_pixel(frame.spec.width / 2, inset).0, [255, 0, 0, 255]);
        // Interior untouched.
        assert_eq!(
            frame.canvas.get_pixel(frame.spec.width / 2, frame.spec.height / 2).0,
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn border_skipped_when_disabled() {
        let mut theme = ThemeSettings::default();
        theme.decorations.show_border = false;
        let event = event(theme);
        let guest = guest();
        let fonts = FontResolver::new(Vec::new());
        let mut frame = preview_frame(&event, &guest, &fonts);

        paint_border(&mut frame).unwrap();
        assert!(frame.canvas.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn motifs_stay_inside_corner_safe_zones() {
        let event = event(ThemeSettings::default());
        let guest = guest();
        let fonts = FontResolver::new(Vec::new());
        let mut frame = preview_frame(&event, &guest, &fonts);
        let mut rng = StdRng::seed_from_u64(99);

        paint_motifs(&mut frame, &mut rng).unwrap();

        // The central band between the corner zones must be untouched.
        let zone = (frame.spec.margin() * 4) as u32;
        for y in zone..frame.spec.height - zone {
            for x in 0..frame.spec.width {
                assert_eq!(frame.canvas.get_pixel(x, y).0, [255, 255, 255, 255]);
            }
        }
    }

    #[test]
    fn motifs_are_deterministic_per_seed() {
        let event = event(ThemeSettings::default());
        let guest = guest();
        let fonts = FontResolver::new(Vec::new());

        let mut a = preview_frame(&event, &guest, &fonts);
        let mut rng_a = StdRng::seed_from_u64(7);
        paint_motifs(&mut a, &mut rng_a).unwrap();

        let mut b = preview_frame(&event, &guest, &fonts);
        let mut rng_b = StdRng::seed_from_u64(7);
        paint_motifs(&mut b, &mut rng_b).unwrap();

        assert_eq!(a.canvas.as_raw(), b.canvas.as_raw());
    }
}
