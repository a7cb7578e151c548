//! The particle record shared by every effect.

use glam::Vec2;

/// One simulated visual element.
///
/// Particles carry no identity beyond their slot in the owning emitter's
/// collection. They are recycled in place when they leave the visible
/// bounds, never destroyed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Drawn size: circle radius, rain streak length, or petal width.
    pub radius: f32,
    /// Current location in surface coordinates.
    pub position: Vec2,
    /// Per-frame displacement. Components are whole numbers stored as reals.
    pub velocity: Vec2,
    /// Opacity, independent of the emitter-wide color.
    pub alpha: u8,
}

impl Particle {
    /// Create a particle from its raw components.
    pub fn new(radius: f32, position: Vec2, velocity: Vec2, alpha: u8) -> Self {
        Self {
            radius,
            position,
            velocity,
            alpha,
        }
    }

    /// Advance one step along both axes.
    #[inline]
    pub fn step(&mut self) {
        self.position += self.velocity;
    }

    /// Euclidean distance to another particle.
    #[inline]
    pub fn distance(&self, other: &Particle) -> f32 {
        self.position.distance(other.position)
    }

    /// Whether the particle sits inside `[0, width] × [0, height]`.
    pub fn is_within(&self, width: f32, height: f32) -> bool {
        (0.0..=width).contains(&self.position.x) && (0.0..=height).contains(&self.position.y)
    }
}
