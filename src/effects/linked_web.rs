//! Drifting dots joined by proximity lines.

use super::{step_wrapping, DEFAULT_STROKE_WIDTH};
use crate::emitter::ParticleEmitter;
use crate::links::LinkPainter;
use crate::paint::{Color, Paint, PaintStyle};
use crate::particle::Particle;
use crate::spawn::SpawnRng;
use crate::surface::Surface;
use std::ops::Range;

const ALPHA_RANGE: Range<i32> = 150..255;
const STEP_RANGE: Range<i32> = -2..2;

/// Slow drifting dots that wrap around the surface edges.
///
/// With lines enabled every pair closer than
/// [`LINK_DISTANCE_MAX`](crate::links::LINK_DISTANCE_MAX) is joined.
#[derive(Debug, Clone)]
pub struct LinkedWebEmitter {
    particles: Vec<Particle>,
    paint: Paint,
    links: LinkPainter,
    rng: SpawnRng,
}

impl LinkedWebEmitter {
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
            particles: Vec::new(),
            paint: Paint::new()
                .style(PaintStyle::Fill)
                .stroke_width(DEFAULT_STROKE_WIDTH)
                .anti_alias(true),
            links: LinkPainter::new(),
            rng,
        }
    }

    /// The seeded particles, in slot order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for hosts that place particles by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

impl Default for LinkedWebEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEmitter for LinkedWebEmitter {
    fn set_particle_color(&mut self, color: Color) {
        self.paint.set_color(color);
    }

    fn set_line_color(&mut self, color: Color) {
        self.links.set_color(color);
    }

    fn seed_particles(&mut self, width: u32, height: u32, min_radius: i32, max_radius: i32, count: usize) {
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.extend((0..count).map(|_| {
            let radius = rng.random_radius(min_radius, max_radius);
            let position = rng.random_in_surface(width, height);
            let velocity = rng.random_velocity(STEP_RANGE, STEP_RANGE);
            let alpha = rng.random_alpha(ALPHA_RANGE);
            Particle::new(radius, position, velocity, alpha)
        }));
        log::debug!("linked web: seeded {} particles on {}x{}", count, width, height);
    }

    fn draw_frame(&mut self, surface: &mut dyn Surface, width: u32, height: u32, lines_enabled: bool, count: usize) {
        let n = count.min(self.particles.len());
        let (w, h) = (width as f32, height as f32);
        for particle in &mut self.particles[..n] {
            step_wrapping(particle, w, h);
        }

        for i in 0..n {
            if lines_enabled {
                self.links.draw_from(&mut *surface, &self.particles, i, n);
            }
            let p = &self.particles[i];
            self.paint.set_alpha(p.alpha);
            surface.draw_circle(p.position, p.radius, &self.paint);
        }
    }
}
