//! The four built-in effects.
//!
//! Two boundary policies are shared between them:
//! - **wrap**: a particle leaving one edge reappears on the opposite edge
//! - **respawn**: a particle leaving the bottom or a side restarts at the
//!   top with a fresh x and a freshly sampled velocity

mod linked_web;
mod meteor_shower;
mod rainfall;
mod rainfall_with_petals;

pub use linked_web::LinkedWebEmitter;
pub use meteor_shower::MeteorShowerEmitter;
pub use rainfall::{drop_rect, RainfallEmitter, RAIN_ALPHA, RAIN_WIDTH};
pub use rainfall_with_petals::{petal_pivot, petal_rect, RainfallWithPetalsEmitter};

use crate::particle::Particle;
use crate::spawn::SpawnRng;
use std::ops::Range;

/// Stroke width of the circle-drawing paints.
pub(crate) const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Step along both axes, wrapping each axis independently.
///
/// Leaving past `0` lands exactly on the far edge and vice versa; the
/// overshoot is discarded rather than carried over.
pub fn step_wrapping(particle: &mut Particle, width: f32, height: f32) {
    particle.step();
    particle.position.x = wrap_axis(particle.position.x, width);
    particle.position.y = wrap_axis(particle.position.y, height);
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Step along both axes; respawn at the top when leaving the bottom or a side.
///
/// Returns `true` when the particle was respawned. Alpha and radius are kept.
pub fn step_respawning(
    particle: &mut Particle,
    width: u32,
    height: u32,
    rng: &mut SpawnRng,
    vx: Range<i32>,
    vy: Range<i32>,
) -> bool {
    particle.step();
    let (w, h) = (width as f32, height as f32);
    let p = particle.position;
    if p.y > h || p.x < 0.0 || p.x > w {
        particle.position.x = rng.random_x(width);
        particle.position.y = 0.0;
        particle.velocity = rng.random_velocity(vx, vy);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::new(5.0, Vec2::new(x, y), Vec2::new(vx, vy), 200)
    }

    #[test]
    fn test_wrap_right_edge_lands_on_zero() {
        let mut p = particle(100.0, 50.0, 1.0, 0.0);
        step_wrapping(&mut p, 100.0, 100.0);
        assert_eq!(p.position, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_wrap_left_edge_lands_on_width() {
        let mut p = particle(0.0, 50.0, -1.0, 0.0);
        step_wrapping(&mut p, 100.0, 80.0);
        assert_eq!(p.position, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_wrap_top_edge_lands_on_height() {
        let mut p = particle(50.0, 1.0, 0.0, -2.0);
        step_wrapping(&mut p, 100.0, 80.0);
        assert_eq!(p.position, Vec2::new(50.0, 80.0));
    }

    #[test]
    fn test_wrap_bottom_edge_lands_on_zero() {
        let mut p = particle(50.0, 79.0, 0.0, 2.0);
        step_wrapping(&mut p, 100.0, 80.0);
        assert_eq!(p.position, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_wrap_edge_is_inclusive() {
        let mut p = particle(99.0, 50.0, 1.0, 0.0);
        step_wrapping(&mut p, 100.0, 100.0);
        assert_eq!(p.position.x, 100.0);
    }

    #[test]
    fn test_respawn_resets_to_top() {
        let mut rng = SpawnRng::with_seed(11);
        let mut p = particle(50.0, 95.0, 0.0, 10.0);
        let respawned = step_respawning(&mut p, 100, 100, &mut rng, -10..10, 5..15);
        assert!(respawned);
        assert_eq!(p.position.y, 0.0);
        assert!((0.0..100.0).contains(&p.position.x));
        assert!((-10.0..10.0).contains(&p.velocity.x));
        assert!((5.0..15.0).contains(&p.velocity.y));
        assert_eq!(p.alpha, 200);
    }

    #[test]
    fn test_respawn_on_side_exit() {
        let mut rng = SpawnRng::with_seed(11);
        let mut p = particle(2.0, 10.0, -5.0, 5.0);
        assert!(step_respawning(&mut p, 100, 100, &mut rng, -10..10, 5..15));
        assert_eq!(p.position.y, 0.0);
    }

    #[test]
    fn test_no_respawn_inside() {
        let mut rng = SpawnRng::with_seed(11);
        let mut p = particle(50.0, 10.0, 3.0, 5.0);
        assert!(!step_respawning(&mut p, 100, 100, &mut rng, -10..10, 5..15));
        assert_eq!(p.position, Vec2::new(53.0, 15.0));
        assert_eq!(p.velocity, Vec2::new(3.0, 5.0));
    }
}
