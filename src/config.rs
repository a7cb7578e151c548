//! Host-side view configuration.
//!
//! These are the attributes a host sets on a particle view: which effect,
//! how many particles, radius bounds, colors and whether links are drawn.
//! Every setter clamps its input, so an emitter only ever sees values
//! inside its contract.
//!
//! Configurations serialize to JSON:
//!
//! ```json
//! {
//!   "effect": "meteor-shower",
//!   "particle_count": 30,
//!   "particle_min_radius": 3,
//!   "particle_max_radius": 8,
//!   "background_color": "#FF101020",
//!   "particle_color": "#FFFFFFFF",
//!   "line_color": "#FF88CCFF",
//!   "lines_enabled": true
//! }
//! ```

use crate::emitter::EffectKind;
use crate::error::ConfigError;
use crate::paint::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on particles per collection. Linking is O(n²).
pub const MAX_PARTICLE_COUNT: usize = 50;

pub const DEFAULT_PARTICLE_COUNT: usize = 20;
pub const DEFAULT_MIN_RADIUS: i32 = 5;
pub const DEFAULT_MAX_RADIUS: i32 = 10;

/// Attributes of a particle view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewConfig")]
pub struct ViewConfig {
    effect: EffectKind,
    particle_count: usize,
    particle_min_radius: i32,
    particle_max_radius: i32,
    background_color: Color,
    particle_color: Color,
    line_color: Color,
    lines_enabled: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_min_radius: DEFAULT_MIN_RADIUS,
            particle_max_radius: DEFAULT_MAX_RADIUS,
            background_color: Color::BLACK,
            particle_color: Color::WHITE,
            line_color: Color::WHITE,
            lines_enabled: true,
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse JSON, then clamp every value into range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Write this configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    // ========== Getters ==========

    pub fn effect(&self) -> EffectKind {
        self.effect
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn particle_min_radius(&self) -> i32 {
        self.particle_min_radius
    }

    pub fn particle_max_radius(&self) -> i32 {
        self.particle_max_radius
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn particle_color(&self) -> Color {
        self.particle_color
    }

    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn lines_enabled(&self) -> bool {
        self.lines_enabled
    }

    // ========== Clamping setters ==========

    pub fn set_effect(&mut self, effect: EffectKind) {
        self.effect = effect;
    }

    /// Clamped to `0..=MAX_PARTICLE_COUNT`.
    pub fn set_particle_count(&mut self, value: i64) {
        self.particle_count = value.clamp(0, MAX_PARTICLE_COUNT as i64) as usize;
    }

    /// Non-positive values and values not below the max radius fall back to 1.
    pub fn set_particle_min_radius(&mut self, value: i32) {
        self.particle_min_radius = if value <= 0 || value >= self.particle_max_radius {
            1
        } else {
            value
        };
    }

    /// Values not above the min radius become `min + 1`.
    pub fn set_particle_max_radius(&mut self, value: i32) {
        self.particle_max_radius = if value <= self.particle_min_radius {
            self.particle_min_radius.saturating_add(1)
        } else {
            value
        };
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn set_particle_color(&mut self, color: Color) {
        self.particle_color = color;
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.line_color = color;
    }

    pub fn set_lines_enabled(&mut self, enabled: bool) {
        self.lines_enabled = enabled;
    }

    // ========== Builder-style ==========

    pub fn with_effect(mut self, effect: EffectKind) -> Self {
        self.set_effect(effect);
        self
    }

    pub fn with_particle_count(mut self, count: i64) -> Self {
        self.set_particle_count(count);
        self
    }

    /// Set both radius bounds at once, independent of the current values.
    ///
    /// `min` is clamped to `1..i32::MAX` and `max` raised to at least `min + 1`.
    pub fn with_radius_range(mut self, min: i32, max: i32) -> Self {
        self.particle_min_radius = min.clamp(1, i32::MAX - 1);
        self.particle_max_radius = if max <= self.particle_min_radius {
            self.particle_min_radius.saturating_add(1)
        } else {
            max
        };
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.set_background_color(color);
        self
    }

    pub fn with_particle_color(mut self, color: Color) -> Self {
        self.set_particle_color(color);
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.set_line_color(color);
        self
    }

    pub fn with_lines_enabled(mut self, enabled: bool) -> Self {
        self.set_lines_enabled(enabled);
        self
    }
}

/// Unclamped file representation. Missing fields take the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawViewConfig {
    effect: EffectKind,
    particle_count: i64,
    particle_min_radius: i32,
    particle_max_radius: i32,
    background_color: Color,
    particle_color: Color,
    line_color: Color,
    lines_enabled: bool,
}

impl Default for RawViewConfig {
    fn default() -> Self {
        let d = ViewConfig::default();
        Self {
            effect: d.effect,
            particle_count: d.particle_count as i64,
            particle_min_radius: d.particle_min_radius,
            particle_max_radius: d.particle_max_radius,
            background_color: d.background_color,
            particle_color: d.particle_color,
            line_color: d.line_color,
            lines_enabled: d.lines_enabled,
        }
    }
}

impl From<RawViewConfig> for ViewConfig {
    fn from(raw: RawViewConfig) -> Self {
        ViewConfig::default()
            .with_effect(raw.effect)
            .with_particle_count(raw.particle_count)
            .with_radius_range(raw.particle_min_radius, raw.particle_max_radius)
            .with_background_color(raw.background_color)
            .with_particle_color(raw.particle_color)
            .with_line_color(raw.line_color)
            .with_lines_enabled(raw.lines_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ViewConfig::default();
        assert_eq!(c.effect(), EffectKind::LinkedWeb);
        assert_eq!(c.particle_count(), 20);
        assert_eq!(c.particle_min_radius(), 5);
        assert_eq!(c.particle_max_radius(), 10);
        assert_eq!(c.background_color(), Color::BLACK);
        assert_eq!(c.particle_color(), Color::WHITE);
        assert_eq!(c.line_color(), Color::WHITE);
        assert!(c.lines_enabled());
    }

    #[test]
    fn test_count_clamping() {
        let mut c = ViewConfig::default();
        c.set_particle_count(80);
        assert_eq!(c.particle_count(), 50);
        c.set_particle_count(-3);
        assert_eq!(c.particle_count(), 0);
        c.set_particle_count(17);
        assert_eq!(c.particle_count(), 17);
    }

    #[test]
    fn test_min_radius_clamping() {
        let mut c = ViewConfig::default();
        c.set_particle_min_radius(0);
        assert_eq!(c.particle_min_radius(), 1);
        c.set_particle_min_radius(10);
        assert_eq!(c.particle_min_radius(), 1);
        c.set_particle_min_radius(7);
        assert_eq!(c.particle_min_radius(), 7);
    }

    #[test]
    fn test_max_radius_clamping() {
        let mut c = ViewConfig::default();
        c.set_particle_max_radius(5);
        assert_eq!(c.particle_max_radius(), 6);
        c.set_particle_max_radius(2);
        assert_eq!(c.particle_max_radius(), 6);
        c.set_particle_max_radius(30);
        assert_eq!(c.particle_max_radius(), 30);
    }

    #[test]
    fn test_radius_range_builder() {
        let c = ViewConfig::default().with_radius_range(12, 20);
        assert_eq!((c.particle_min_radius(), c.particle_max_radius()), (12, 20));
        let c = ViewConfig::default().with_radius_range(-4, 0);
        assert_eq!((c.particle_min_radius(), c.particle_max_radius()), (1, 2));
    }

    #[test]
    fn test_json_applies_clamps() {
        let json = r##"{
            "effect": "rainfall",
            "particle_count": 400,
            "particle_min_radius": 12,
            "particle_max_radius": 12,
            "line_color": "#3366FF"
        }"##;
        let c = ViewConfig::from_json_str(json).unwrap();
        assert_eq!(c.effect(), EffectKind::Rainfall);
        assert_eq!(c.particle_count(), 50);
        assert_eq!(c.particle_min_radius(), 12);
        assert_eq!(c.particle_max_radius(), 13);
        assert_eq!(c.line_color(), Color::rgb(0x33, 0x66, 0xFF));
        assert_eq!(c.particle_color(), Color::WHITE);
    }

    #[test]
    fn test_json_rejects_bad_color() {
        let err = ViewConfig::from_json_str(r##"{"particle_color": "white"}"##).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let c = ViewConfig::default()
            .with_effect(EffectKind::MeteorShower)
            .with_particle_count(33)
            .with_line_color(Color::from_argb(0x80, 1, 2, 3));
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(ViewConfig::from_json_str(&json).unwrap(), c);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ViewConfig::load("/nonexistent/particlefx.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
