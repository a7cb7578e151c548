//! Proximity links between particles.
//!
//! Every unordered pair closer than [`LINK_DISTANCE_MAX`] is joined by a
//! line whose opacity is capped by the fainter endpoint and fades linearly
//! with distance:
//!
//! ```text
//! alpha = min(alpha_a, alpha_b) * (220 - d) / 220 / 2
//! ```
//!
//! The scan is a plain O(n²) pass over at most 50 particles.

use crate::paint::{Color, Paint, PaintStyle};
use crate::particle::Particle;
use crate::surface::{Path, Surface};

/// Maximum distance at which two particles are linked.
pub const LINK_DISTANCE_MAX: f32 = 220.0;

/// Stroke width of link lines.
pub const LINK_STROKE_WIDTH: f32 = 2.0;

/// Opacity of a link between endpoints of opacity `a` and `b`, `distance` apart.
///
/// Returns `None` when the pair is too far apart to link.
#[inline]
pub fn link_alpha(a: u8, b: u8, distance: f32) -> Option<u8> {
    // Written so NaN distances never link.
    if !(distance < LINK_DISTANCE_MAX) {
        return None;
    }
    let ratio = (LINK_DISTANCE_MAX - distance) / LINK_DISTANCE_MAX;
    Some((a.min(b) as f32 * ratio / 2.0) as u8)
}

/// Draws links with one reusable path and paint.
#[derive(Debug, Clone)]
pub struct LinkPainter {
    path: Path,
    paint: Paint,
}

impl Default for LinkPainter {
    fn default() -> Self {
        Self {
            path: Path::new(),
            paint: Paint::new()
                .style(PaintStyle::FillAndStroke)
                .stroke_width(LINK_STROKE_WIDTH)
                .anti_alias(true),
        }
    }
}

impl LinkPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_color(&mut self, color: Color) {
        self.paint.set_color(color);
    }

    /// Draw every link from slot `i` to the slots after it, up to `count`.
    pub fn draw_from<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        particles: &[Particle],
        i: usize,
        count: usize,
    ) {
        let n = count.min(particles.len());
        let Some(a) = particles.get(i) else {
            return;
        };
        for b in particles.iter().take(n).skip(i + 1) {
            let Some(alpha) = link_alpha(a.alpha, b.alpha, a.distance(b)) else {
                continue;
            };
            self.path.move_to(a.position);
            self.path.line_to(b.position);
            self.paint.set_alpha(alpha);
            surface.draw_path(&self.path, &self.paint);
            self.path.reset();
        }
    }
}
