//! The emitter capability contract and the closed set of built-in effects.
//!
//! Every effect is a flat implementation of [`ParticleEmitter`]: two color
//! setters, seeding, and drawing one frame. Hosts that want a closed set
//! hold an [`Emitter`], which dispatches to the four built-in effects;
//! hosts that bring their own effects can use `Box<dyn ParticleEmitter>`.
//!
//! # Effects
//!
//! | Kind | Motion | Boundary | Drawn as |
//! |------|--------|----------|----------|
//! | [`EffectKind::LinkedWeb`] | drift, `[-2, 2)` | wrap | circles + links |
//! | [`EffectKind::MeteorShower`] | fall, `vy ∈ [5, 15)` | respawn at top | circles + links |
//! | [`EffectKind::Rainfall`] | straight down | respawn at top | thin rectangles |
//! | [`EffectKind::RainfallWithPetals`] | rain + drifting petals | respawn at top | rectangles + rotated ovals |
//!
//! # Example
//!
//! ```ignore
//! let mut emitter = EffectKind::MeteorShower.build_seeded(7);
//! emitter.set_particle_color(Color::WHITE);
//! emitter.seed_particles(640, 480, 5, 10, 20);
//!
//! // Once per frame, after the host cleared the surface:
//! emitter.draw_frame(&mut surface, 640, 480, true, 20);
//! ```

use crate::effects::{LinkedWebEmitter, MeteorShowerEmitter, RainfallEmitter, RainfallWithPetalsEmitter};
use crate::error::ParseEffectError;
use crate::paint::Color;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability set shared by every visual effect.
///
/// Seeding and drawing are driven by exactly one render thread. Color
/// setters affect subsequent frames only.
pub trait ParticleEmitter {
    /// Color of the primary particles. Effects without one ignore it.
    fn set_particle_color(&mut self, color: Color);

    /// Color of link lines, or of rain streaks for the rain effects.
    fn set_line_color(&mut self, color: Color);

    /// Discard all particles and generate exactly `count` fresh ones.
    ///
    /// The only place particle collections change size. Safe to call on
    /// every surface resize.
    fn seed_particles(
        &mut self,
        width: u32,
        height: u32,
        min_radius: i32,
        max_radius: i32,
        count: usize,
    );

    /// Advance every particle one step, then draw the post-update state.
    ///
    /// `count` bounds the iteration and is clipped to the live collection,
    /// so a stale count never indexes out of range. `count == 0` draws nothing.
    fn draw_frame(
        &mut self,
        surface: &mut dyn Surface,
        width: u32,
        height: u32,
        lines_enabled: bool,
        count: usize,
    );
}

impl<E: ParticleEmitter + ?Sized> ParticleEmitter for Box<E> {
    fn set_particle_color(&mut self, color: Color) {
        (**self).set_particle_color(color)
    }

    fn set_line_color(&mut self, color: Color) {
        (**self).set_line_color(color)
    }

    fn seed_particles(&mut self, width: u32, height: u32, min_radius: i32, max_radius: i32, count: usize) {
        (**self).seed_particles(width, height, min_radius, max_radius, count)
    }

    fn draw_frame(&mut self, surface: &mut dyn Surface, width: u32, height: u32, lines_enabled: bool, count: usize) {
        (**self).draw_frame(surface, width, height, lines_enabled, count)
    }
}

/// Identifies one of the built-in effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Drifting dots joined by proximity lines.
    #[default]
    LinkedWeb,
    /// Dots falling diagonally from the top, optionally linked.
    MeteorShower,
    /// Vertical rain streaks.
    Rainfall,
    /// Rain streaks with tumbling petals on top.
    RainfallWithPetals,
}

impl EffectKind {
    /// Every built-in effect, in declaration order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::LinkedWeb,
        EffectKind::MeteorShower,
        EffectKind::Rainfall,
        EffectKind::RainfallWithPetals,
    ];

    /// Kebab-case name, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::LinkedWeb => "linked-web",
            EffectKind::MeteorShower => "meteor-shower",
            EffectKind::Rainfall => "rainfall",
            EffectKind::RainfallWithPetals => "rainfall-with-petals",
        }
    }

    /// Build the effect with an entropy-seeded random source.
    pub fn build(self) -> Emitter {
        match self {
            EffectKind::LinkedWeb => LinkedWebEmitter::new().into(),
            EffectKind::MeteorShower => MeteorShowerEmitter::new().into(),
            EffectKind::Rainfall => RainfallEmitter::new().into(),
            EffectKind::RainfallWithPetals => RainfallWithPetalsEmitter::new().into(),
        }
    }

    /// Build the effect with a deterministic random source.
    pub fn build_seeded(self, seed: u64) -> Emitter {
        match self {
            EffectKind::LinkedWeb => LinkedWebEmitter::with_seed(seed).into(),
            EffectKind::MeteorShower => MeteorShowerEmitter::with_seed(seed).into(),
            EffectKind::Rainfall => RainfallEmitter::with_seed(seed).into(),
            EffectKind::RainfallWithPetals => RainfallWithPetalsEmitter::with_seed(seed).into(),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseEffectError(s.to_string()))
    }
}

/// One of the built-in effects.
#[derive(Debug, Clone)]
pub enum Emitter {
    LinkedWeb(LinkedWebEmitter),
    MeteorShower(MeteorShowerEmitter),
    Rainfall(RainfallEmitter),
    RainfallWithPetals(RainfallWithPetalsEmitter),
}

impl Emitter {
    /// Which effect this is.
    pub fn kind(&self) -> EffectKind {
        match self {
            Emitter::LinkedWeb(_) => EffectKind::LinkedWeb,
            Emitter::MeteorShower(_) => EffectKind::MeteorShower,
            Emitter::Rainfall(_) => EffectKind::Rainfall,
            Emitter::RainfallWithPetals(_) => EffectKind::RainfallWithPetals,
        }
    }

    /// Total particles held across all of the effect's collections.
    pub fn particle_count(&self) -> usize {
        match self {
            Emitter::LinkedWeb(e) => e.particles().len(),
            Emitter::MeteorShower(e) => e.particles().len(),
            Emitter::Rainfall(e) => e.particles().len(),
            Emitter::RainfallWithPetals(e) => e.rain().len() + e.petals().len(),
        }
    }

    fn as_dyn(&mut self) -> &mut dyn ParticleEmitter {
        match self {
            Emitter::LinkedWeb(e) => e,
            Emitter::MeteorShower(e) => e,
            Emitter::Rainfall(e) => e,
            Emitter::RainfallWithPetals(e) => e,
        }
    }
}

impl ParticleEmitter for Emitter {
    fn set_particle_color(&mut self, color: Color) {
        self.as_dyn().set_particle_color(color)
    }

    fn set_line_color(&mut self, color: Color) {
        self.as_dyn().set_line_color(color)
    }

    fn seed_particles(&mut self, width: u32, height: u32, min_radius: i32, max_radius: i32, count: usize) {
        self.as_dyn()
            .seed_particles(width, height, min_radius, max_radius, count)
    }

    fn draw_frame(&mut self, surface: &mut dyn Surface, width: u32, height: u32, lines_enabled: bool, count: usize) {
        self.as_dyn()
            .draw_frame(surface, width, height, lines_enabled, count)
    }
}

impl From<LinkedWebEmitter> for Emitter {
    fn from(e: LinkedWebEmitter) -> Self {
        Emitter::LinkedWeb(e)
    }
}

impl From<MeteorShowerEmitter> for Emitter {
    fn from(e: MeteorShowerEmitter) -> Self {
        Emitter::MeteorShower(e)
    }
}

impl From<RainfallEmitter> for Emitter {
    fn from(e: RainfallEmitter) -> Self {
        Emitter::Rainfall(e)
    }
}

impl From<RainfallWithPetalsEmitter> for Emitter {
    fn from(e: RainfallWithPetalsEmitter) -> Self {
        Emitter::RainfallWithPetals(e)
    }
}
