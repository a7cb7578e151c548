//! Software rasterizer implementing [`Surface`] over an RGBA image.
//!
//! Used by the demo binary to write PNG frames, and by anything that wants
//! pixels without a GPU or a window. Shapes are rasterized by testing each
//! pixel center against the shape in local (untransformed) coordinates, so
//! rotated primitives cost the same as axis-aligned ones.
//!
//! Blending is straight-alpha source-over. With `anti_alias` set, circle
//! and oval edges get one pixel of linear coverage falloff.

use crate::error::FrameError;
use crate::paint::{Color, Paint, PaintStyle};
use crate::surface::{Path, Rect, Surface, TransformStack};
use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};
use std::path::Path as FsPath;

/// An owned RGBA framebuffer.
#[derive(Debug, Clone)]
pub struct Pixmap {
    image: RgbaImage,
    transforms: TransformStack,
}

impl Pixmap {
    /// Transparent pixmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            transforms: TransformStack::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color of one pixel, or `None` outside the pixmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::from_argb(p[3], p[0], p[1], p[2]))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode as PNG at `path`.
    pub fn save_png<P: AsRef<FsPath>>(&self, path: P) -> Result<(), FrameError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Source-over blend `color` scaled by `coverage` into one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let Some(dst) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };
        let sa = color.alpha() as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let src = color.to_rgba();
        let mut out = [0u8; 4];
        for c in 0..3 {
            let s = src[c] as f32;
            let d = dst[c] as f32;
            let v = if out_a > 0.0 {
                (s * sa + d * da * (1.0 - sa)) / out_a
            } else {
                0.0
            };
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        *dst = Rgba(out);
    }

    /// Visit every pixel whose center may fall inside `local` once transformed,
    /// passing the pixel center mapped back into local coordinates.
    fn scan<F>(&mut self, local: Rect, pad: f32, color: Color, mut coverage: F)
    where
        F: FnMut(Vec2) -> f32,
    {
        let transform = self.transforms.current();
        let Some((x0, y0, x1, y1)) = self.device_bounds(transform, local, pad) else {
            return;
        };
        let inverse = transform.inverse();
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let cov = coverage(inverse.transform_point2(center));
                if cov > 0.0 {
                    self.blend(x, y, color, cov);
                }
            }
        }
    }

    /// Pixel range covering `local` after `transform`, clipped to the image.
    fn device_bounds(&self, transform: Affine2, local: Rect, pad: f32) -> Option<(u32, u32, u32, u32)> {
        let corners = [
            Vec2::new(local.left - pad, local.top - pad),
            Vec2::new(local.right + pad, local.top - pad),
            Vec2::new(local.left - pad, local.bottom + pad),
            Vec2::new(local.right + pad, local.bottom + pad),
        ]
        .map(|c| transform.transform_point2(c));

        let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |m, c| m.min(*c));
        let max = corners.iter().fold(Vec2::splat(f32::NEG_INFINITY), |m, c| m.max(*c));
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        let (w, h) = (self.width() as f32, self.height() as f32);
        let x0 = min.x.floor().clamp(0.0, w) as u32;
        let y0 = min.y.floor().clamp(0.0, h) as u32;
        let x1 = max.x.ceil().clamp(0.0, w) as u32;
        let y1 = max.y.ceil().clamp(0.0, h) as u32;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

/// Coverage of a point at signed distance `d` from an edge (negative = inside).
#[inline]
fn edge_coverage(d: f32, anti_alias: bool) -> f32 {
    if anti_alias {
        (0.5 - d).clamp(0.0, 1.0)
    } else if d <= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Coverage for a filled/stroked shape given the signed distance to its outline.
#[inline]
fn styled_coverage(d: f32, paint: &Paint) -> f32 {
    let half = paint.stroke_width.max(1.0) * 0.5;
    match paint.style {
        PaintStyle::Fill => edge_coverage(d, paint.anti_alias),
        PaintStyle::FillAndStroke => edge_coverage(d - half, paint.anti_alias),
        PaintStyle::Stroke => edge_coverage(d.abs() - half, paint.anti_alias),
    }
}

fn stroke_pad(paint: &Paint) -> f32 {
    match paint.style {
        PaintStyle::Fill => 1.0,
        _ => paint.stroke_width.max(1.0) * 0.5 + 1.0,
    }
}

/// Distance from `p` to the segment `a`–`b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Pixmap {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn clear(&mut self, color: Color) {
        let px = Rgba(color.to_rgba());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        let pad = stroke_pad(paint);
        self.scan(bounds, pad, paint.color, |p| {
            styled_coverage(p.distance(center) - radius, paint)
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let half = paint.stroke_width.max(1.0) * 0.5;
        for (a, b) in path.segments() {
            let bounds = Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
            self.scan(bounds, half + 1.0, paint.color, |p| {
                edge_coverage(segment_distance(p, a, b) - half, paint.anti_alias)
            });
        }
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        let pad = stroke_pad(paint);
        // Rectangles stay hard-edged so thin streaks keep their width.
        let hard = Paint {
            anti_alias: false,
            ..paint.clone()
        };
        let center = rect.center();
        let half = Vec2::new(rect.width() * 0.5, rect.height() * 0.5);
        self.scan(rect, pad, paint.color, |p| {
            // Signed distance to an axis-aligned box.
            let q = (p - center).abs() - half;
            let outside = q.max(Vec2::ZERO).length();
            let inside = q.x.max(q.y).min(0.0);
            styled_coverage(outside + inside, &hard)
        });
    }

    fn draw_oval(&mut self, rect: Rect, paint: &Paint) {
        let center = rect.center();
        let radii = Vec2::new(rect.width() * 0.5, rect.height() * 0.5);
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let pad = stroke_pad(paint);
        let min_radius = radii.x.min(radii.y);
        self.scan(rect, pad, paint.color, |p| {
            // Approximate signed distance: scaled implicit value times the smaller radius.
            let k = ((p - center) / radii).length();
            styled_coverage((k - 1.0) * min_radius, paint)
        });
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.transforms.rotate(degrees, pivot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: Color) -> Paint {
        let mut p = Paint::new();
        p.set_color(color);
        p
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut pm = Pixmap::new(4, 3);
        pm.clear(Color::rgb(1, 2, 3));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(pm.pixel(x, y), Some(Color::rgb(1, 2, 3)));
            }
        }
        assert_eq!(pm.pixel(4, 0), None);
    }

    #[test]
    fn test_rect_covers_exact_pixels() {
        let mut pm = Pixmap::new(20, 50);
        pm.clear(Color::BLACK);
        pm.draw_rect(Rect::new(10.0, 20.0, 13.0, 45.0), &solid(Color::WHITE));
        assert_eq!(pm.pixel(10, 20), Some(Color::WHITE));
        assert_eq!(pm.pixel(12, 44), Some(Color::WHITE));
        assert_eq!(pm.pixel(13, 20), Some(Color::BLACK));
        assert_eq!(pm.pixel(9, 20), Some(Color::BLACK));
        assert_eq!(pm.pixel(10, 45), Some(Color::BLACK));
    }

    #[test]
    fn test_circle_center_filled_outside_untouched() {
        let mut pm = Pixmap::new(30, 30);
        pm.clear(Color::BLACK);
        pm.draw_circle(Vec2::new(15.0, 15.0), 5.0, &solid(Color::WHITE));
        assert_eq!(pm.pixel(15, 15), Some(Color::WHITE));
        assert_eq!(pm.pixel(15, 22), Some(Color::BLACK));
        assert_eq!(pm.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_half_alpha_blends_over_black() {
        let mut pm = Pixmap::new(3, 3);
        pm.clear(Color::BLACK);
        pm.draw_rect(
            Rect::new(0.0, 0.0, 3.0, 3.0),
            &solid(Color::from_argb(128, 255, 255, 255)),
        );
        let px = pm.pixel(1, 1).unwrap();
        assert_eq!(px.alpha(), 255);
        assert!((127..=129).contains(&px.red()));
    }

    #[test]
    fn test_line_drawn_along_path() {
        let mut pm = Pixmap::new(20, 20);
        pm.clear(Color::BLACK);
        let mut path = Path::new();
        path.move_to(Vec2::new(2.0, 10.5));
        path.line_to(Vec2::new(18.0, 10.5));
        pm.draw_path(&path, &solid(Color::WHITE).stroke_width(2.0));
        assert_eq!(pm.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(pm.pixel(10, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_rotated_oval_lies_along_rotated_axis() {
        // A tall thin oval rotated a quarter turn becomes wide and flat.
        let mut pm = Pixmap::new(40, 40);
        pm.clear(Color::BLACK);
        let rect = Rect::new(18.0, 10.0, 22.0, 30.0);
        pm.save();
        pm.rotate(90.0, rect.center());
        pm.draw_oval(rect, &solid(Color::WHITE));
        pm.restore();

        assert_eq!(pm.pixel(12, 20), Some(Color::WHITE));
        assert_eq!(pm.pixel(20, 12), Some(Color::BLACK));
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut pm = Pixmap::new(10, 10);
        pm.draw_circle(Vec2::new(-50.0, -50.0), 5.0, &solid(Color::WHITE));
        pm.draw_rect(Rect::new(100.0, 100.0, 120.0, 120.0), &solid(Color::WHITE));
        assert!(pm.image().pixels().all(|p| p[3] == 0));
    }
}
