//! Dots streaking down from the top of the surface.

use super::{step_respawning, DEFAULT_STROKE_WIDTH};
use crate::emitter::ParticleEmitter;
use crate::links::LinkPainter;
use crate::paint::{Color, Paint, PaintStyle};
use crate::particle::Particle;
use crate::spawn::SpawnRng;
use crate::surface::Surface;
use std::ops::Range;

const ALPHA_RANGE: Range<i32> = 150..255;
const VX_RANGE: Range<i32> = -10..10;
const VY_RANGE: Range<i32> = 5..15;

/// Meteors seeded in the top quarter, falling with a sideways drift.
///
/// A meteor leaving the bottom or either side restarts at `y = 0` with a
/// new x and a freshly sampled velocity. Drawing and linking match
/// [`LinkedWebEmitter`](super::LinkedWebEmitter).
#[derive(Debug, Clone)]
pub struct MeteorShowerEmitter {
    particles: Vec<Particle>,
    paint: Paint,
    links: LinkPainter,
    rng: SpawnRng,
}

impl MeteorShowerEmitter {
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

impl Default for MeteorShowerEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEmitter for MeteorShowerEmitter {
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
            let position = rng.random_in_top_quarter(width, height);
            let velocity = rng.random_velocity(VX_RANGE, VY_RANGE);
            let alpha = rng.random_alpha(ALPHA_RANGE);
            Particle::new(radius, position, velocity, alpha)
        }));
        log::debug!("meteor shower: seeded {} particles on {}x{}", count, width, height);
    }

    fn draw_frame(&mut self, surface: &mut dyn Surface, width: u32, height: u32, lines_enabled: bool, count: usize) {
        let n = count.min(self.particles.len());
        for particle in &mut self.particles[..n] {
            step_respawning(particle, width, height, &mut self.rng, VX_RANGE, VY_RANGE);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use glam::Vec2;

    #[test]
    fn test_seed_in_top_quarter() {
        let mut e = MeteorShowerEmitter::with_seed(1);
        e.seed_particles(200, 400, 5, 10, 50);
        assert_eq!(e.particles().len(), 50);
        for p in e.particles() {
            assert!((0.0..200.0).contains(&p.position.x));
            assert!((0.0..100.0).contains(&p.position.y));
            assert!((-10.0..10.0).contains(&p.velocity.x));
            assert!((5.0..15.0).contains(&p.velocity.y));
            assert!((150..255).contains(&p.alpha));
            assert!((5.0..10.0).contains(&p.radius));
        }
    }

    #[test]
    fn test_meteor_leaving_bottom_respawns_with_new_velocity() {
        let mut e = MeteorShowerEmitter::with_seed(2);
        e.seed_particles(100, 100, 5, 10, 1);
        {
            let p = &mut e.particles_mut()[0];
            p.position = Vec2::new(50.0, 99.0);
            // Outside the seed range, so any re-sample is observable.
            p.velocity = Vec2::new(0.0, 40.0);
        }
        let mut s = RecordingSurface::new(100, 100);
        e.draw_frame(&mut s, 100, 100, false, 1);

        let p = e.particles()[0];
        assert_eq!(p.position.y, 0.0);
        assert!((0.0..100.0).contains(&p.position.x));
        assert!((5.0..15.0).contains(&p.velocity.y));
        assert!((-10.0..10.0).contains(&p.velocity.x));
    }

    #[test]
    fn test_meteors_stay_in_bounds() {
        let mut e = MeteorShowerEmitter::with_seed(3);
        e.seed_particles(120, 90, 5, 10, 30);
        let mut s = RecordingSurface::new(120, 90);
        for _ in 0..500 {
            e.draw_frame(&mut s, 120, 90, true, 30);
            s.clear_commands();
            for p in e.particles() {
                assert!(p.is_within(120.0, 90.0), "{:?}", p);
            }
        }
    }

    #[test]
    fn test_reseed_replaces_collection() {
        let mut e = MeteorShowerEmitter::with_seed(4);
        e.seed_particles(100, 100, 5, 10, 7);
        e.seed_particles(100, 100, 5, 10, 7);
        assert_eq!(e.particles().len(), 7);
        e.seed_particles(100, 100, 5, 10, 2);
        assert_eq!(e.particles().len(), 2);
    }
}
