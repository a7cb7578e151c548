//! # particlefx - 2D particle effects for view backgrounds
//!
//! A small family of animated particle effects drawn onto any immediate-mode
//! 2D surface: a drifting web of linked dots, a meteor shower, rainfall, and
//! rainfall with falling petals.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particlefx::prelude::*;
//!
//! let mut effect = EffectKind::LinkedWeb.build();
//! effect.set_particle_color(Color::WHITE);
//! effect.set_line_color(Color::rgb(120, 180, 255));
//! effect.seed_particles(800, 600, 5, 10, 30);
//!
//! let mut frame = Pixmap::new(800, 600);
//! for i in 0..60 {
//!     frame.clear(Color::BLACK);
//!     effect.draw_frame(&mut frame, 800, 600, true, 30);
//!     frame.save_png(format!("frame_{:04}.png", i))?;
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Emitters
//!
//! Every effect implements [`ParticleEmitter`]:
//!
//! - `set_particle_color` / `set_line_color` set the two configurable colors
//! - `seed_particles` rebuilds the particle collection for a surface size
//! - `draw_frame` advances every particle one step, then draws
//!
//! [`EffectKind`] names the built-in effects and [`Emitter`] holds any one of
//! them behind a single type.
//!
//! ### Links
//!
//! The linked web joins every pair of particles closer than 220 pixels. The
//! link is drawn with the line color at
//! `min(alpha_a, alpha_b) * (220 - d) / 220 / 2`, so lines fade out as
//! particles drift apart. See [`links`].
//!
//! ### Surfaces
//!
//! Effects draw through the [`Surface`] trait: circles, paths, rects, ovals
//! and a save/rotate/restore transform stack. [`Pixmap`] rasterizes into an
//! RGBA image and [`RecordingSurface`] records commands for inspection.
//!
//! ### Hosting
//!
//! [`ParticleView`] holds a [`ViewConfig`] and the active emitter behind one
//! lock, so settings can change from any thread between frames.
//! [`RenderLoop`] drives a view on a background thread against a
//! [`SurfaceProvider`].
//!
//! ## Feature Overview
//!
//! | Effect | Particle color | Line color | Links |
//! |--------|----------------|------------|-------|
//! | [`LinkedWebEmitter`] | dots | links | yes |
//! | [`MeteorShowerEmitter`] | meteors | links | yes |
//! | [`RainfallEmitter`] | unused | rain streaks | no |
//! | [`RainfallWithPetalsEmitter`] | petals | rain streaks | no |

pub mod config;
pub mod effects;
mod emitter;
pub mod error;
pub mod links;
mod paint;
mod particle;
mod raster;
mod spawn;
pub mod surface;
pub mod time;
pub mod view;

pub use config::ViewConfig;
pub use effects::{LinkedWebEmitter, MeteorShowerEmitter, RainfallEmitter, RainfallWithPetalsEmitter};
pub use emitter::{EffectKind, Emitter, ParticleEmitter};
pub use error::{ConfigError, FrameError, ParseColorError, ParseEffectError};
pub use glam::Vec2;
pub use paint::{Color, Paint, PaintStyle};
pub use particle::Particle;
pub use raster::Pixmap;
pub use spawn::SpawnRng;
pub use surface::{DrawCommand, Path, RecordingSurface, Rect, Surface};
pub use time::FrameClock;
pub use view::{ParticleView, RenderLoop, SurfaceProvider};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use particlefx::prelude::*;
/// ```
///
/// This imports:
/// - [`ParticleEmitter`] - the effect contract
/// - [`EffectKind`] and [`Emitter`] - built-in effects
/// - [`Surface`], [`Pixmap`] and [`RecordingSurface`] - drawing targets
/// - [`Color`] and [`Paint`] - colors and paint state
/// - [`ParticleView`], [`RenderLoop`] and [`ViewConfig`] - hosting
/// - [`Vec2`] - glam vector type
pub mod prelude {
    pub use crate::config::ViewConfig;
    pub use crate::effects::{LinkedWebEmitter, MeteorShowerEmitter, RainfallEmitter, RainfallWithPetalsEmitter};
    pub use crate::emitter::{EffectKind, Emitter, ParticleEmitter};
    pub use crate::paint::{Color, Paint, PaintStyle};
    pub use crate::particle::Particle;
    pub use crate::raster::Pixmap;
    pub use crate::surface::{Path, RecordingSurface, Rect, Surface};
    pub use crate::time::FrameClock;
    pub use crate::view::{ParticleView, RenderLoop, SurfaceProvider};
    pub use crate::Vec2;
}
