//! Raster drawing primitives over [`RgbaImage`].
//!
//! The compositor draws everything explicitly: rounded panels, border
//! motifs, gradients, and pasted sub-images all come through here. All
//! primitives clip silently at the canvas edges and blend source-over, so
//! stages never have to bounds-check their own geometry.

use image::{Rgb, Rgba, RgbaImage};

use crate::color;

/// Blends a single pixel source-over onto an opaque canvas.
pub fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    if x >= img.width() || y >= img.height() || color[3] == 0 {
        return;
    }
    let alpha = color[3] as f32 / 255.0;
    let inv = 1.0 - alpha;
    let dst = img.get_pixel_mut(x, y);
    dst[0] = (color[0] as f32 * alpha + dst[0] as f32 * inv) as u8;
    dst[1] = (color[1] as f32 * alpha + dst[1] as f32 * inv) as u8;
    dst[2] = (color[2] as f32 * alpha + dst[2] as f32 * inv) as u8;
    dst[3] = 255;
}

/// Composites a source image onto the canvas at the given position,
/// clipping at the edges.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;
            if dx < 0 || dy < 0 {
                continue;
            }
            blend_pixel(dest, dx as u32, dy as u32, *src.get_pixel(sx, sy));
        }
    }
}

/// Fills an axis-aligned rectangle.
pub fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, color: Rgba<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            if px >= 0 && py >= 0 {
                blend_pixel(img, px as u32, py as u32, color);
            }
        }
    }
}

/// Strokes an axis-aligned rectangle outline of the given line width,
/// drawn inward from the rectangle edge.
pub fn stroke_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, stroke: i32, color: Rgba<u8>) {
    fill_rect(img, x, y, w, stroke, color);
    fill_rect(img, x, y + h - stroke, w, stroke, color);
    fill_rect(img, x, y + stroke, stroke, h - 2 * stroke, color);
    fill_rect(img, x + w - stroke, y + stroke, stroke, h - 2 * stroke, color);
}

/// Horizontal line segment of the given thickness.
pub fn hline(img: &mut RgbaImage, x0: i32, x1: i32, y: i32, thickness: i32, color: Rgba<u8>) {
    fill_rect(img, x0.min(x1), y, (x1 - x0).abs(), thickness.max(1), color);
}

// Local-space containment test for a rounded rectangle: inside the central
// cross, or within radius of the nearest corner center.
fn rounded_contains(lx: i32, ly: i32, w: i32, h: i32, r: i32) -> bool {
    if lx < 0 || ly < 0 || lx >= w || ly >= h {
        return false;
    }
    if lx >= r && lx < w - r {
        return true;
    }
    if ly >= r && ly < h - r {
        return true;
    }
    let cx = if lx < r { r - 1 } else { w - r };
    let cy = if ly < r { r - 1 } else { h - r };
    let dx = lx - cx;
    let dy = ly - cy;
    dx * dx + dy * dy <= r * r
}

/// Fills a rounded rectangle.
pub fn fill_rounded_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, r: i32, color: Rgba<u8>) {
    let r = r.min(w / 2).min(h / 2).max(0);
    for ly in 0..h {
        for lx in 0..w {
            if rounded_contains(lx, ly, w, h, r) {
                let px = x + lx;
                let py = y + ly;
                if px >= 0 && py >= 0 {
                    blend_pixel(img, px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Strokes a rounded-rectangle outline of the given line width.
pub fn stroke_rounded_rect(
    img: &mut RgbaImage,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    r: i32,
    stroke: i32,
    color: Rgba<u8>,
) {
    let r = r.min(w / 2).min(h / 2).max(0);
    let inner_r = (r - stroke).max(0);
    for ly in 0..h {
        for lx in 0..w {
            let outer = rounded_contains(lx, ly, w, h, r);
            let inner = rounded_contains(
                lx - stroke,
                ly - stroke,
                w - 2 * stroke,
                h - 2 * stroke,
                inner_r,
            );
            if outer && !inner {
                let px = x + lx;
                let py = y + ly;
                if px >= 0 && py >= 0 {
                    blend_pixel(img, px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Strokes a circle outline as a filled ring.
pub fn stroke_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32, stroke: i32, color: Rgba<u8>) {
    let outer2 = radius * radius;
    let inner = (radius - stroke.max(1)).max(0);
    let inner2 = inner * inner;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 <= outer2 && d2 > inner2 {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && py >= 0 {
                    blend_pixel(img, px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Fills a circle.
pub fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && py >= 0 {
                    blend_pixel(img, px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Fills a triangle using edge-function sign tests over its bounding box.
pub fn fill_triangle(img: &mut RgbaImage, pts: [(i32, i32); 3], color: Rgba<u8>) {
    let edge = |a: (i32, i32), b: (i32, i32), p: (i32, i32)| -> i64 {
        (b.0 - a.0) as i64 * (p.1 - a.1) as i64 - (b.1 - a.1) as i64 * (p.0 - a.0) as i64
    };
    let min_x = pts.iter().map(|p| p.0).min().unwrap_or(0);
    let max_x = pts.iter().map(|p| p.0).max().unwrap_or(0);
    let min_y = pts.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = pts.iter().map(|p| p.1).max().unwrap_or(0);
    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let p = (px, py);
            let e0 = edge(pts[0], pts[1], p);
            let e1 = edge(pts[1], pts[2], p);
            let e2 = edge(pts[2], pts[0], p);
            let inside = (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0);
            if inside && px >= 0 && py >= 0 {
                blend_pixel(img, px as u32, py as u32, color);
            }
        }
    }
}

/// Fills a diamond (rotated square) centered at `(cx, cy)`.
pub fn fill_diamond(img: &mut RgbaImage, cx: i32, cy: i32, half: i32, color: Rgba<u8>) {
    for dy in -half..=half {
        for dx in -half..=half {
            if dx.abs() + dy.abs() <= half {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && py >= 0 {
                    blend_pixel(img, px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Fills rows `y0..y1` across the canvas width with a vertical gradient
/// from `from` (top) to `to` (bottom).
pub fn vertical_gradient(img: &mut RgbaImage, y0: i32, y1: i32, from: Rgb<u8>, to: Rgb<u8>) {
    let span = (y1 - y0).max(1) as f32;
    for y in y0.max(0)..y1.min(img.height() as i32) {
        let factor = (y - y0) as f32 / span;
        let row = color::mix(from, to, factor);
        for x in 0..img.width() {
            img.put_pixel(x, y as u32, Rgba([row[0], row[1], row[2], 255]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn blend_pixel_clips_out_of_bounds() {
        let mut img = canvas(4, 4);
        blend_pixel(&mut img, 10, 10, Rgba([255, 255, 255, 255]));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn fill_rounded_rect_skips_corners() {
        let mut img = canvas(40, 40);
        fill_rounded_rect(&mut img, 0, 0, 40, 40, 12, Rgba([255, 0, 0, 255]));
        // Extreme corner stays untouched, center is filled.
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(20, 20).0, [255, 0, 0, 255]);
    }

    #[test]
    fn stroke_rounded_rect_leaves_interior() {
        let mut img = canvas(40, 40);
        stroke_rounded_rect(&mut img, 0, 0, 40, 40, 8, 3, Rgba([0, 255, 0, 255]));
        assert_eq!(img.get_pixel(20, 20).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(20, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn stroke_circle_is_a_ring() {
        let mut img = canvas(41, 41);
        stroke_circle(&mut img, 20, 20, 15, 2, Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(20, 20).0, [0, 0, 0, 255]);
        // Directly above the center at the outer radius.
        assert_eq!(img.get_pixel(20, 5).0, [0, 0, 255, 255]);
    }

    #[test]
    fn triangle_covers_centroid() {
        let mut img = canvas(30, 30);
        fill_triangle(&mut img, [(0, 29), (29, 29), (15, 0)], Rgba([255, 255, 0, 255]));
        assert_eq!(img.get_pixel(15, 20).0, [255, 255, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn gradient_interpolates_endpoints() {
        let mut img = canvas(4, 10);
        vertical_gradient(&mut img, 0, 10, Rgb([0, 0, 0]), Rgb([200, 100, 50]));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        let last = img.get_pixel(0, 9);
        assert!(last[0] > 170 && last[1] > 80 && last[2] > 40);
    }

    #[test]
    fn composite_clips_negative_offsets() {
        let mut dest = canvas(10, 10);
        let src = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        composite_over(&mut dest, &src, -2, -2);
        assert_eq!(dest.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(dest.get_pixel(3, 3).0, [0, 0, 0, 255]);
    }
}
