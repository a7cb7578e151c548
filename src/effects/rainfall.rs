//! Vertical rain streaks.

use crate::emitter::ParticleEmitter;
use crate::paint::{Color, Paint, PaintStyle};
use crate::particle::Particle;
use crate::spawn::SpawnRng;
use crate::surface::{Rect, Surface};
use glam::Vec2;
use std::ops::Range;

/// Fixed opacity of every streak.
pub const RAIN_ALPHA: u8 = 200;
/// Streak width in pixels.
pub const RAIN_WIDTH: f32 = 3.0;
const RAIN_LENGTH_MIN: f32 = 15.0;
const RAIN_LENGTH_MAX: f32 = 30.0;
const RAIN_VY_RANGE: Range<i32> = 10..20;

/// A streak whose `radius` is its length: `15 ≤ radius < 30`, falling
/// straight down.
pub(crate) fn spawn_drop(rng: &mut SpawnRng, width: u32, height: u32) -> Particle {
    let length = rng.random_range(RAIN_LENGTH_MIN, RAIN_LENGTH_MAX);
    let position = rng.random_in_top_quarter(width, height);
    let vy = rng.random_int(RAIN_VY_RANGE.start, RAIN_VY_RANGE.end);
    Particle::new(length, position, Vec2::new(0.0, vy as f32), RAIN_ALPHA)
}

/// Fall one step; below the bottom edge restart at `y = 0` with a new x.
///
/// Velocity and alpha are constants of the effect and survive the respawn.
pub(crate) fn step_drop(drop: &mut Particle, width: u32, height: u32, rng: &mut SpawnRng) {
    drop.position.y += drop.velocity.y;
    if drop.position.y > height as f32 {
        drop.position.x = rng.random_x(width);
        drop.position.y = 0.0;
    }
}

/// Rectangle covered by a streak: `(x, y)` to `(x + RAIN_WIDTH, y + length)`.
#[inline]
pub fn drop_rect(drop: &Particle) -> Rect {
    let Vec2 { x, y } = drop.position;
    Rect::new(x, y, x + RAIN_WIDTH, y + drop.radius)
}

pub(crate) fn rain_paint() -> Paint {
    Paint::new()
        .style(PaintStyle::Fill)
        .stroke_width(RAIN_WIDTH)
        .anti_alias(true)
}

pub(crate) fn draw_drop(surface: &mut dyn Surface, drop: &Particle, paint: &mut Paint) {
    paint.set_alpha(drop.alpha);
    surface.draw_rect(drop_rect(drop), paint);
}

/// Rain only. The line color colors the streaks; there is no particle color.
#[derive(Debug, Clone)]
pub struct RainfallEmitter {
    drops: Vec<Particle>,
    paint: Paint,
    rng: SpawnRng,
}

impl RainfallEmitter {
    /// Empty emitter with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(SpawnRng::new())
    }

    /// Empty emitter whose particle stream is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SpawnRng::with_seed(seed))
    }

    /// Empty emitter drawing from `rng`.
    pub fn with_rng(rng: SpawnRng) -> Self {
        Self {
            drops: Vec::new(),
            paint: rain_paint(),
            rng,
        }
    }

    /// The seeded streaks, in slot order.
    pub fn particles(&self) -> &[Particle] {
        &self.drops
    }

    /// Mutable access for hosts that place particles by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.drops
    }
}

impl Default for RainfallEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEmitter for RainfallEmitter {
    fn set_particle_color(&mut self, _color: Color) {}

    fn set_line_color(&mut self, color: Color) {
        self.paint.set_color(color);
    }

    fn seed_particles(&mut self, width: u32, height: u32, _min_radius: i32, _max_radius: i32, count: usize) {
        let rng = &mut self.rng;
        self.drops.clear();
        self.drops
            .extend((0..count).map(|_| spawn_drop(rng, width, height)));
        log::debug!("rainfall: seeded {} drops on {}x{}", count, width, height);
    }

    fn draw_frame(&mut self, surface: &mut dyn Surface, width: u32, height: u32, _lines_enabled: bool, count: usize) {
        let n = count.min(self.drops.len());
        for drop in &mut self.drops[..n] {
            step_drop(drop, width, height, &mut self.rng);
            draw_drop(surface, drop, &mut self.paint);
        }
    }
}
