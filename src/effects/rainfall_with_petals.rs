//! Rain with petals tumbling over it.

use super::rainfall::{draw_drop, rain_paint, spawn_drop, step_drop};
use super::{step_respawning, DEFAULT_STROKE_WIDTH};
use crate::emitter::ParticleEmitter;
use crate::paint::{Color, Paint, PaintStyle};
use crate::particle::Particle;
use crate::spawn::SpawnRng;
use crate::surface::{Rect, Surface};
use glam::Vec2;
use std::ops::Range;

const PETAL_ALPHA_RANGE: Range<i32> = 150..255;
const PETAL_VX_RANGE: Range<i32> = -3..3;
const PETAL_VY_RANGE: Range<i32> = 3..8;
/// Tilt applied to each petal, in whole degrees, re-rolled every frame.
const PETAL_ROTATION_RANGE: Range<i32> = -10..10;

/// Oval bounds of a petal: `radius` wide and twice as tall.
#[inline]
pub fn petal_rect(petal: &Particle) -> Rect {
    let Vec2 { x, y } = petal.position;
    Rect::new(x, y, x + petal.radius, y + petal.radius * 2.0)
}

/// Point the petal is tilted about.
#[inline]
pub fn petal_pivot(petal: &Particle) -> Vec2 {
    petal.position + Vec2::splat(petal.radius / 2.0)
}

/// Two independent collections: rain streaks and petals.
///
/// Rain follows [`RainfallEmitter`](super::RainfallEmitter) exactly. Petals
/// move like meteors with gentler speeds and are drawn as ovals tilted by
/// a fresh random angle every frame; the tilt is not stored, so petals
/// jitter rather than spin. Rain is drawn first so petals sit on top.
///
/// The line color colors the rain, the particle color the petals.
#[derive(Debug, Clone)]
pub struct RainfallWithPetalsEmitter {
    rain: Vec<Particle>,
    petals: Vec<Particle>,
    rain_paint: Paint,
    petal_paint: Paint,
    rng: SpawnRng,
}

impl RainfallWithPetalsEmitter {
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
            rain: Vec::new(),
            petals: Vec::new(),
            rain_paint: rain_paint(),
            petal_paint: Paint::new()
                .style(PaintStyle::Fill)
                .stroke_width(DEFAULT_STROKE_WIDTH)
                .anti_alias(true),
            rng,
        }
    }

    /// Rain streaks, in slot order.
    pub fn rain(&self) -> &[Particle] {
        &self.rain
    }

    /// Petals, in slot order.
    pub fn petals(&self) -> &[Particle] {
        &self.petals
    }

    /// Mutable access to the petals.
    pub fn petals_mut(&mut self) -> &mut [Particle] {
        &mut self.petals
    }

    fn draw_petal(&mut self, surface: &mut dyn Surface, index: usize) {
        let petal = self.petals[index];
        let degrees = self
            .rng
            .random_int(PETAL_ROTATION_RANGE.start, PETAL_ROTATION_RANGE.end);
        self.petal_paint.set_alpha(petal.alpha);
        surface.save();
        surface.rotate(degrees as f32, petal_pivot(&petal));
        surface.draw_oval(petal_rect(&petal), &self.petal_paint);
        surface.restore();
    }
}

impl Default for RainfallWithPetalsEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEmitter for RainfallWithPetalsEmitter {
    fn set_particle_color(&mut self, color: Color) {
        self.petal_paint.set_color(color);
    }

    fn set_line_color(&mut self, color: Color) {
        self.rain_paint.set_color(color);
    }

    fn seed_particles(&mut self, width: u32, height: u32, min_radius: i32, max_radius: i32, count: usize) {
        self.rain.clear();
        self.petals.clear();
        for _ in 0..count {
            let drop = spawn_drop(&mut self.rng, width, height);
            self.rain.push(drop);

            let rng = &mut self.rng;
            let radius = rng.random_radius(min_radius, max_radius);
            let position = rng.random_in_top_quarter(width, height);
            let velocity = rng.random_velocity(PETAL_VX_RANGE, PETAL_VY_RANGE);
            let alpha = rng.random_alpha(PETAL_ALPHA_RANGE);
            self.petals.push(Particle::new(radius, position, velocity, alpha));
        }
        log::debug!(
            "rainfall with petals: seeded {} drops and {} petals on {}x{}",
            count,
            count,
            width,
            height
        );
    }

    fn draw_frame(&mut self, surface: &mut dyn Surface, width: u32, height: u32, _lines_enabled: bool, count: usize) {
        let rain = count.min(self.rain.len());
        for drop in &mut self.rain[..rain] {
            step_drop(drop, width, height, &mut self.rng);
            draw_drop(surface, drop, &mut self.rain_paint);
        }

        let petals = count.min(self.petals.len());
        for i in 0..petals {
            step_respawning(
                &mut self.petals[i],
                width,
                height,
                &mut self.rng,
                PETAL_VX_RANGE,
                PETAL_VY_RANGE,
            );
            self.draw_petal(surface, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{rotation_about, DrawCommand, RecordingSurface};

    #[test]
    fn test_seed_both_collections() {
        let mut e = RainfallWithPetalsEmitter::with_seed(1);
        e.seed_particles(100, 100, 5, 10, 12);
        assert_eq!(e.rain().len(), 12);
        assert_eq!(e.petals().len(), 12);
        for p in e.petals() {
            assert!((5.0..10.0).contains(&p.radius));
            assert!((-3.0..3.0).contains(&p.velocity.x));
            assert!((3.0..8.0).contains(&p.velocity.y));
            assert!((150..255).contains(&p.alpha));
            assert!((0.0..25.0).contains(&p.position.y));
        }
    }

    #[test]
    fn test_rain_drawn_before_petals() {
        let mut e = RainfallWithPetalsEmitter::with_seed(2);
        e.seed_particles(200, 2000, 5, 10, 5);
        let mut s = RecordingSurface::new(200, 2000);
        e.draw_frame(&mut s, 200, 2000, true, 5);

        let kinds: Vec<bool> = s
            .commands()
            .iter()
            .map(|c| matches!(c, DrawCommand::Rect { .. }))
            .collect();
        assert_eq!(kinds, vec![true, true, true, true, true, false, false, false, false, false]);
        assert_eq!(s.oval_count(), 5);
        assert_eq!(s.save_depth(), 0);
    }

    #[test]
    fn test_petal_oval_geometry_and_tilt() {
        let mut e = RainfallWithPetalsEmitter::with_seed(3);
        e.set_particle_color(Color::rgb(255, 182, 193));
        e.seed_particles(200, 2000, 5, 10, 1);
        {
            let p = &mut e.petals_mut()[0];
            p.position = Vec2::new(40.0, 50.0);
            p.velocity = Vec2::new(1.0, 4.0);
            p.radius = 8.0;
        }
        let alpha = e.petals()[0].alpha;
        let mut s = RecordingSurface::new(200, 2000);
        e.draw_frame(&mut s, 200, 2000, false, 1);

        let Some(DrawCommand::Oval { rect, color, transform }) = s.commands().last() else {
            panic!("expected an oval last");
        };
        assert_eq!(*rect, Rect::new(41.0, 54.0, 49.0, 70.0));
        assert_eq!(*color, Color::from_argb(alpha, 255, 182, 193));

        let pivot = Vec2::new(45.0, 58.0);
        let matches_some_tilt = (-10..10).any(|deg| {
            let expected = rotation_about(deg as f32, pivot);
            expected.abs_diff_eq(*transform, 1e-4)
        });
        assert!(matches_some_tilt, "transform {:?}", transform);
    }

    #[test]
    fn test_petals_stay_in_bounds() {
        let mut e = RainfallWithPetalsEmitter::with_seed(4);
        e.seed_particles(80, 60, 2, 6, 20);
        let mut s = RecordingSurface::new(80, 60);
        for _ in 0..300 {
            e.draw_frame(&mut s, 80, 60, false, 20);
            s.clear_commands();
            for p in e.petals() {
                assert!(p.is_within(80.0, 60.0), "{:?}", p);
            }
        }
    }

    #[test]
    fn test_colors_route_to_their_collection() {
        let mut e = RainfallWithPetalsEmitter::with_seed(5);
        e.set_line_color(Color::rgb(0, 0, 255));
        e.set_particle_color(Color::rgb(255, 0, 0));
        e.seed_particles(100, 2000, 5, 10, 1);
        let mut s = RecordingSurface::new(100, 2000);
        e.draw_frame(&mut s, 100, 2000, false, 1);
        match (&s.commands()[0], &s.commands()[1]) {
            (DrawCommand::Rect { color: rain, .. }, DrawCommand::Oval { color: petal, .. }) => {
                assert_eq!((rain.red(), rain.blue()), (0, 255));
                assert_eq!((petal.red(), petal.blue()), (255, 0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
