//! Property-based invariant tests for the built-in effects.
//!
//! Verifies:
//! 1. Linked web: particles never leave the inclusive surface rectangle
//! 2. Meteor shower: particles stay in bounds and keep falling
//! 3. Petals and rain: every respawn lands on the top edge inside the width
//! 4. Seeding: radii, alphas and counts honor the requested ranges
//! 5. Links: alpha never exceeds half the fainter endpoint
//! 6. Config: clamped values always satisfy the emitter contract

use particlefx::links::{link_alpha, LINK_DISTANCE_MAX};
use particlefx::{
    LinkedWebEmitter, MeteorShowerEmitter, ParticleEmitter, RainfallEmitter, RainfallWithPetalsEmitter,
    RecordingSurface, ViewConfig,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_size() -> impl Strategy<Value = (u32, u32)> {
    (10u32..2000, 10u32..2000)
}

fn arb_radius_range() -> impl Strategy<Value = (i32, i32)> {
    (1i32..20).prop_flat_map(|min| (Just(min), (min + 1)..40))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ── 1. Linked web wraps inside the surface ────────────────────────

    #[test]
    fn linked_web_stays_in_bounds(
        seed in any::<u64>(),
        (w, h) in arb_size(),
        count in 0usize..=50,
        frames in 1usize..120,
    ) {
        let mut e = LinkedWebEmitter::with_seed(seed);
        e.seed_particles(w, h, 5, 10, count);
        let mut surface = RecordingSurface::new(w, h);
        for _ in 0..frames {
            e.draw_frame(&mut surface, w, h, true, count);
            surface.clear_commands();
            for p in e.particles() {
                prop_assert!(p.is_within(w as f32, h as f32), "escaped: {:?}", p);
            }
        }
    }

    // ── 2. Meteors respawn instead of escaping ────────────────────────

    #[test]
    fn meteor_shower_stays_in_bounds(
        seed in any::<u64>(),
        (w, h) in arb_size(),
        count in 1usize..=50,
        frames in 1usize..200,
    ) {
        let mut e = MeteorShowerEmitter::with_seed(seed);
        e.seed_particles(w, h, 5, 10, count);
        let mut surface = RecordingSurface::new(w, h);
        for _ in 0..frames {
            e.draw_frame(&mut surface, w, h, false, count);
            surface.clear_commands();
            for p in e.particles() {
                prop_assert!(p.is_within(w as f32, h as f32), "escaped: {:?}", p);
                prop_assert!(p.velocity.y >= 5.0 && p.velocity.y < 15.0);
            }
        }
    }

    // ── 3. Rain and petals ────────────────────────────────────────────

    #[test]
    fn rainfall_with_petals_stays_in_bounds(
        seed in any::<u64>(),
        (w, h) in arb_size(),
        count in 1usize..=50,
        frames in 1usize..200,
    ) {
        let mut e = RainfallWithPetalsEmitter::with_seed(seed);
        e.seed_particles(w, h, 5, 10, count);
        let mut surface = RecordingSurface::new(w, h);
        for _ in 0..frames {
            e.draw_frame(&mut surface, w, h, true, count);
            prop_assert_eq!(surface.save_depth(), 0);
            surface.clear_commands();
            for p in e.rain().iter().chain(e.petals()) {
                prop_assert!(p.is_within(w as f32, h as f32), "escaped: {:?}", p);
            }
        }
    }

    #[test]
    fn rainfall_keeps_alpha_and_length(
        seed in any::<u64>(),
        (w, h) in arb_size(),
        frames in 1usize..100,
    ) {
        let mut e = RainfallEmitter::with_seed(seed);
        e.seed_particles(w, h, 1, 2, 20);
        let before: Vec<_> = e.particles().iter().map(|p| (p.radius, p.alpha)).collect();
        let mut surface = RecordingSurface::new(w, h);
        for _ in 0..frames {
            e.draw_frame(&mut surface, w, h, false, 20);
            surface.clear_commands();
        }
        let after: Vec<_> = e.particles().iter().map(|p| (p.radius, p.alpha)).collect();
        prop_assert_eq!(before, after);
    }

    // ── 4. Seeding ranges ─────────────────────────────────────────────

    #[test]
    fn linked_web_seeding_ranges(
        seed in any::<u64>(),
        (w, h) in arb_size(),
        (min, max) in arb_radius_range(),
        count in 0usize..=50,
    ) {
        let mut e = LinkedWebEmitter::with_seed(seed);
        e.seed_particles(w, h, min, max, count);
        prop_assert_eq!(e.particles().len(), count);
        for p in e.particles() {
            prop_assert!(p.radius >= min as f32 && p.radius < max as f32);
            prop_assert!((150..255).contains(&p.alpha));
            prop_assert!(p.velocity.x >= -2.0 && p.velocity.x < 2.0);
            prop_assert!(p.velocity.y >= -2.0 && p.velocity.y < 2.0);
            prop_assert!(p.position.x < w as f32 && p.position.y < h as f32);
        }
    }

    // ── 5. Link opacity ───────────────────────────────────────────────

    #[test]
    fn link_alpha_bounded(a in any::<u8>(), b in any::<u8>(), d in 0.0f32..400.0) {
        match link_alpha(a, b, d) {
            Some(alpha) => {
                prop_assert!(d < LINK_DISTANCE_MAX);
                prop_assert!(alpha <= a.min(b) / 2);
            }
            None => prop_assert!(d >= LINK_DISTANCE_MAX),
        }
    }

    // ── 6. Config clamping ────────────────────────────────────────────

    #[test]
    fn config_clamps_into_contract(count in any::<i64>(), min in any::<i32>(), max in any::<i32>()) {
        let c = ViewConfig::default()
            .with_particle_count(count)
            .with_radius_range(min, max);
        prop_assert!(c.particle_count() <= 50);
        prop_assert!(c.particle_min_radius() >= 1);
        prop_assert!(c.particle_max_radius() > c.particle_min_radius());
    }
}
