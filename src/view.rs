//! Host-side driver: the view that owns the active emitter and the render
//! loop that paints it.
//!
//! [`ParticleView`] is a cheap, cloneable handle over state guarded by one
//! mutex. Each frame holds that lock for the whole seed-clear-update-draw
//! pass, so color setters or an emitter swap from another thread land
//! strictly between frames and never observe a half-drawn one.
//!
//! [`RenderLoop`] runs frames on a background thread against a
//! [`SurfaceProvider`], skipping any frame whose surface cannot be acquired.
//!
//! # Example
//!
//! ```ignore
//! let view = ParticleView::new(ViewConfig::default().with_effect(EffectKind::Rainfall));
//! let render = RenderLoop::start(view.clone(), my_window_provider);
//!
//! // Later, from the UI thread:
//! view.set_line_color(Color::rgb(120, 160, 255));
//! view.attach(EffectKind::RainfallWithPetals.build());
//!
//! // On pause or surface teardown:
//! let provider = render.request_exit_and_wait();
//! ```

use crate::config::ViewConfig;
use crate::emitter::{EffectKind, ParticleEmitter};
use crate::error::FrameError;
use crate::paint::Color;
use crate::surface::Surface;
use crate::time::FrameClock;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

type BoxedEmitter = Box<dyn ParticleEmitter + Send>;

struct ViewState {
    config: ViewConfig,
    emitter: Option<BoxedEmitter>,
    /// Surface size the current particles were seeded for.
    seeded_size: Option<(u32, u32)>,
    /// Force a re-seed on the next frame (attach, count or radius change).
    needs_seed: bool,
    /// Seed used when the view builds the configured effect itself.
    random_seed: Option<u64>,
    /// Set by `detach`; suppresses building the configured effect.
    detached: bool,
}

impl ViewState {
    fn attach(&mut self, mut emitter: BoxedEmitter) -> Option<BoxedEmitter> {
        emitter.set_particle_color(self.config.particle_color());
        emitter.set_line_color(self.config.line_color());
        self.needs_seed = true;
        self.detached = false;
        self.emitter.replace(emitter)
    }

    fn build_configured(&self) -> BoxedEmitter {
        let kind = self.config.effect();
        match self.random_seed {
            Some(seed) => Box::new(kind.build_seeded(seed)),
            None => Box::new(kind.build()),
        }
    }
}

/// Shared handle to a particle view.
#[derive(Clone)]
pub struct ParticleView {
    state: Arc<Mutex<ViewState>>,
}

impl Default for ParticleView {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl ParticleView {
    /// View with no emitter attached. The configured effect is attached on
    /// the first frame unless [`attach`](Self::attach) is called first.
    pub fn new(config: ViewConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState {
                config,
                emitter: None,
                seeded_size: None,
                needs_seed: true,
                random_seed: None,
                detached: false,
            })),
        }
    }

    /// Seed the random source of effects the view builds itself.
    pub fn with_random_seed(self, seed: u64) -> Self {
        self.state.lock().random_seed = Some(seed);
        self
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> ViewConfig {
        self.state.lock().config.clone()
    }

    /// Make `emitter` the active effect, returning the previous one.
    ///
    /// Blocks until any in-flight frame completes. The configured colors
    /// are pushed into the new emitter and it is seeded on the next frame.
    pub fn attach<E>(&self, emitter: E) -> Option<Box<dyn ParticleEmitter + Send>>
    where
        E: ParticleEmitter + Send + 'static,
    {
        let previous = self.state.lock().attach(Box::new(emitter));
        log::debug!("particle view: emitter attached");
        previous
    }

    /// Remove the active effect. The next frame only clears the surface.
    pub fn detach(&self) -> Option<Box<dyn ParticleEmitter + Send>> {
        let mut state = self.state.lock();
        state.seeded_size = None;
        state.needs_seed = true;
        state.detached = true;
        state.emitter.take()
    }

    pub fn has_emitter(&self) -> bool {
        self.state.lock().emitter.is_some()
    }

    /// Switch to a built-in effect, keeping the rest of the configuration.
    pub fn set_effect(&self, kind: EffectKind) {
        let mut state = self.state.lock();
        state.config.set_effect(kind);
        let emitter = state.build_configured();
        state.attach(emitter);
        log::debug!("particle view: switched to {}", kind);
    }

    // ========== Configuration ==========

    pub fn set_particle_count(&self, count: i64) {
        let mut state = self.state.lock();
        state.config.set_particle_count(count);
        state.needs_seed = true;
    }

    pub fn set_particle_min_radius(&self, value: i32) {
        let mut state = self.state.lock();
        state.config.set_particle_min_radius(value);
        state.needs_seed = true;
    }

    pub fn set_particle_max_radius(&self, value: i32) {
        let mut state = self.state.lock();
        state.config.set_particle_max_radius(value);
        state.needs_seed = true;
    }

    pub fn set_background_color(&self, color: Color) {
        self.state.lock().config.set_background_color(color);
    }

    /// Also forwarded to the active emitter.
    pub fn set_particle_color(&self, color: Color) {
        let mut state = self.state.lock();
        state.config.set_particle_color(color);
        if let Some(emitter) = state.emitter.as_mut() {
            emitter.set_particle_color(color);
        }
    }

    /// Also forwarded to the active emitter.
    pub fn set_line_color(&self, color: Color) {
        let mut state = self.state.lock();
        state.config.set_line_color(color);
        if let Some(emitter) = state.emitter.as_mut() {
            emitter.set_line_color(color);
        }
    }

    pub fn set_lines_enabled(&self, enabled: bool) {
        self.state.lock().config.set_lines_enabled(enabled);
    }

    // ========== Frames ==========

    /// Render one frame into `surface`.
    ///
    /// Attaches the configured effect if none is attached, re-seeds when the
    /// surface size changed or a seed was requested, clears with the
    /// background color, then lets the emitter update and draw. A zero-sized
    /// surface is only cleared.
    pub fn render_frame(&self, surface: &mut dyn Surface) {
        let mut state = self.state.lock();
        let (width, height) = surface.dimensions();
        surface.clear(state.config.background_color());
        if width == 0 || height == 0 {
            return;
        }

        if state.emitter.is_none() && !state.detached {
            let emitter = state.build_configured();
            state.attach(emitter);
        }

        let config = state.config.clone();
        let resized = state.seeded_size != Some((width, height));
        let reseed = state.needs_seed || resized;
        let Some(emitter) = state.emitter.as_mut() else {
            return;
        };

        if reseed {
            emitter.seed_particles(
                width,
                height,
                config.particle_min_radius(),
                config.particle_max_radius(),
                config.particle_count(),
            );
            log::debug!(
                "particle view: seeded {} particles for {}x{}",
                config.particle_count(),
                width,
                height
            );
        }

        emitter.draw_frame(
            surface,
            width,
            height,
            config.lines_enabled(),
            config.particle_count(),
        );

        if reseed {
            state.seeded_size = Some((width, height));
            state.needs_seed = false;
        }
    }
}

/// Source of drawable surfaces, one per frame.
///
/// Mirrors a platform lock/post cycle: `lock_surface` hands out a surface
/// to draw into, `unlock_and_post` presents it.
pub trait SurfaceProvider: Send + 'static {
    type Surface: Surface;

    fn lock_surface(&mut self) -> Result<Self::Surface, FrameError>;

    fn unlock_and_post(&mut self, surface: Self::Surface) -> Result<(), FrameError>;

    /// Stop the render loop after the current frame. Finite targets such as
    /// an image sequence return `true` once complete.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Background thread repeatedly rendering a [`ParticleView`].
///
/// Dropping the loop stops the thread and waits for it.
pub struct RenderLoop<P: SurfaceProvider> {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<P>>,
}

impl<P: SurfaceProvider> RenderLoop<P> {
    /// Start rendering as fast as the provider allows.
    pub fn start(view: ParticleView, provider: P) -> Self {
        Self::start_with_clock(view, provider, FrameClock::new())
    }

    /// Start rendering, paced by `clock`'s target frame rate.
    pub fn start_with_clock(view: ParticleView, provider: P, clock: FrameClock) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || run_frames(view, provider, flag, clock));
        log::debug!("render loop: started");
        Self {
            running,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop after the in-flight frame and hand the provider back.
    ///
    /// Returns `None` if the render thread panicked.
    pub fn request_exit_and_wait(mut self) -> Option<P> {
        self.stop()
    }

    fn stop(&mut self) -> Option<P> {
        self.running.store(false, Ordering::Release);
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(provider) => {
                log::debug!("render loop: stopped");
                Some(provider)
            }
            Err(_) => {
                log::warn!("render loop: render thread panicked");
                None
            }
        }
    }
}

impl<P: SurfaceProvider> Drop for RenderLoop<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_frames<P: SurfaceProvider>(
    view: ParticleView,
    mut provider: P,
    running: Arc<AtomicBool>,
    mut clock: FrameClock,
) -> P {
    while running.load(Ordering::Acquire) && !provider.is_finished() {
        match provider.lock_surface() {
            Ok(mut surface) => {
                view.render_frame(&mut surface);
                if let Err(e) = provider.unlock_and_post(surface) {
                    log::warn!("render loop: frame {} not posted: {}", clock.frame(), e);
                }
            }
            Err(e) => {
                log::warn!("render loop: skipping frame {}: {}", clock.frame(), e);
                thread::yield_now();
            }
        }

        if clock.tick() {
            log::debug!("render loop: {:.1} fps, last frame {:.2?}", clock.fps(), clock.delta());
        }
        let budget = clock.remaining_budget();
        if !budget.is_zero() {
            thread::sleep(budget);
        }
    }
    running.store(false, Ordering::Release);
    provider
}
