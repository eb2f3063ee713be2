// Host-side tests for the glitch trigger schedule.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod glitch {
    include!("../src/core/glitch.rs");
}

use constants::*;
use glitch::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(seed: u64) -> GlitchPass {
    GlitchPass::new(StdRng::seed_from_u64(seed))
}

#[test]
fn trigger_period_is_within_range() {
    for seed in 0..50 {
        let mut g = seeded(seed);
        for _ in 0..3 {
            let t = g.trigger_period();
            assert!((GLITCH_TRIGGER_MIN_FRAMES..=GLITCH_TRIGGER_MAX_FRAMES).contains(&t));
            g.update();
        }
    }
}

#[test]
fn first_frame_is_a_strong_glitch() {
    let mut g = seeded(1);
    let (kind, p) = g.update();
    assert_eq!(kind, GlitchKind::Strong);
    assert!(!p.bypass);
    assert!(p.amount >= 0.0 && p.amount < 1.0 / 30.0);
    assert!(p.seed_x >= -1.0 && p.seed_x < 1.0);
    assert_eq!(p.col_s, GLITCH_COLUMN_SPREAD);
    assert_eq!(g.frame(), 1);
}

#[test]
fn period_runs_mild_then_off_then_strong() {
    let mut g = seeded(42);
    g.update();
    let period = g.trigger_period();
    let mild_frames = (1..period)
        .filter(|&f| (f as f32) < period as f32 / 5.0)
        .count();
    let mut seen_mild = 0;
    for frame in 1..period {
        let (kind, p) = g.update();
        if (frame as f32) < period as f32 / 5.0 {
            assert_eq!(kind, GlitchKind::Mild, "frame {}", frame);
            assert!(p.seed_x >= -0.3 && p.seed_x < 0.3);
            assert!(p.amount < 1.0 / 90.0);
            seen_mild += 1;
        } else {
            assert_eq!(kind, GlitchKind::Off, "frame {}", frame);
            assert!(p.bypass);
        }
    }
    assert_eq!(seen_mild, mild_frames);
    let (kind, _) = g.update();
    assert_eq!(kind, GlitchKind::Strong);
}

#[test]
fn go_wild_glitches_every_frame() {
    let mut g = seeded(3);
    g.go_wild = true;
    for _ in 0..10 {
        assert_eq!(g.update().0, GlitchKind::Strong);
    }
}

#[test]
fn same_seed_same_sequence() {
    let mut a = seeded(9);
    let mut b = seeded(9);
    for _ in 0..300 {
        assert_eq!(a.update(), b.update());
    }
}

#[test]
fn displacement_map_is_opaque_rgba() {
    let mut g = seeded(5);
    let map = g.displacement_map(8);
    assert_eq!(map.len(), 8 * 8 * 4);
    assert!(map.chunks_exact(4).all(|px| px[3] == 255));
    assert!(map.chunks_exact(4).any(|px| px[0] != map[0] || px[1] != map[1]));
}
