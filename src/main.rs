//! Headless demo: renders an effect to a numbered PNG sequence.
//!
//! ```text
//! particlefx --effect meteor-shower --frames 120 --out frames/
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use particlefx::{EffectKind, FrameClock, FrameError, ParticleView, Pixmap, RenderLoop, SurfaceProvider, ViewConfig};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "particlefx", version, about = "Render decorative particle effects to PNG frames")]
struct Cli {
    /// Effect to render (linked-web, meteor-shower, rainfall, rainfall-with-petals)
    #[arg(short, long)]
    effect: Option<EffectKind>,

    /// Number of frames to write
    #[arg(short = 'n', long, default_value_t = 60)]
    frames: u32,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Particles per collection (clamped to 0..=50)
    #[arg(short, long)]
    count: Option<i64>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// JSON view configuration; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this path and continue
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Cap the render rate
    #[arg(long)]
    fps: Option<f32>,

    /// Disable links between particles
    #[arg(long)]
    no_lines: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Writes each posted frame as `frame_NNNN.png` until `total` frames were posted.
struct PngSequence {
    dir: PathBuf,
    width: u32,
    height: u32,
    next: u32,
    total: u32,
    failed: u32,
}

impl SurfaceProvider for PngSequence {
    type Surface = Pixmap;

    fn lock_surface(&mut self) -> Result<Pixmap, FrameError> {
        Ok(Pixmap::new(self.width, self.height))
    }

    fn unlock_and_post(&mut self, pixmap: Pixmap) -> Result<(), FrameError> {
        let path = self.dir.join(format!("frame_{:04}.png", self.next));
        self.next += 1;
        match pixmap.save_png(&path) {
            Ok(()) => {
                log::debug!("wrote {}", path.display());
                Ok(())
            }
            Err(e) => {
                self.failed += 1;
                Err(e)
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.next >= self.total
    }
}

/// Filter used when `RUST_LOG` is unset.
fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn load_config(cli: &Cli) -> Result<ViewConfig> {
    let mut config = match &cli.config {
        Some(path) => ViewConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ViewConfig::default(),
    };
    if let Some(effect) = cli.effect {
        config.set_effect(effect);
    }
    if let Some(count) = cli.count {
        config.set_particle_count(count);
    }
    if cli.no_lines {
        config.set_lines_enabled(false);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_log_filter(cli.verbose)))
        .init();

    let config = load_config(&cli)?;
    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("failed to save config to {}", path.display()))?;
        info!("saved configuration to {}", path.display());
    }

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("failed to create output directory {}", cli.out.display()))?;

    info!(
        "rendering {} frames of {} at {}x{} ({} particles)",
        cli.frames,
        config.effect(),
        cli.width,
        cli.height,
        config.particle_count()
    );

    let mut view = ParticleView::new(config);
    if let Some(seed) = cli.seed {
        view = view.with_random_seed(seed);
    }

    let mut clock = FrameClock::new();
    clock.set_target_fps(cli.fps);

    let provider = PngSequence {
        dir: cli.out.clone(),
        width: cli.width,
        height: cli.height,
        next: 0,
        total: cli.frames,
        failed: 0,
    };

    let started = Instant::now();
    let render = RenderLoop::start_with_clock(view, provider, clock);
    while render.is_running() {
        thread::sleep(Duration::from_millis(10));
    }
    let provider = render
        .request_exit_and_wait()
        .context("render thread panicked")?;

    if provider.failed > 0 {
        warn!("{} of {} frames could not be written", provider.failed, provider.total);
    }
    info!(
        "wrote {} frames to {} in {:.2?}",
        provider.next - provider.failed,
        cli.out.display(),
        started.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_sets_default_filter() {
        assert_eq!(default_log_filter(0), "info");
        assert_eq!(default_log_filter(1), "debug");
        assert_eq!(default_log_filter(2), "trace");
        assert_eq!(default_log_filter(9), "trace");
    }

    #[test]
    fn test_verbose_flag_counts() {
        let cli = Cli::try_parse_from(["particlefx", "-vv", "--no-lines"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(default_log_filter(cli.verbose), "trace");
        assert!(!load_config(&cli).unwrap().lines_enabled());
    }
}
