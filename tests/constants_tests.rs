// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn animation_rates_match_the_page_design() {
    assert_eq!(ROTATION_SMOOTHING, 0.1);
    assert_eq!(MODEL_SPIN_RATE, 0.2);
    assert_eq!(COLOR_CYCLE_RATE, 0.5);
    assert_eq!(LIGHT_CYCLE_COLORS, [0x8000ff, 0x0000ff, 0xff0000, 0xffffff]);
    assert_eq!(PANEL_HIDE_DELAY_MS, 3000);
    assert_eq!(DEFAULT_VOLUME, 0.4);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Smoothing must converge without overshoot
    assert!(ROTATION_SMOOTHING > 0.0 && ROTATION_SMOOTHING <= 1.0);
    assert!(MAX_FRAME_DELTA_SEC > 0.0 && MAX_FRAME_DELTA_SEC < 1.0);

    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_NEAR);
    assert!(CAMERA_FOV_DEGREES > 0.0 && CAMERA_FOV_DEGREES < 180.0);

    // The orbit height |sin * A + O| stays above the model
    assert!(LIGHT_BOB_OFFSET >= LIGHT_BOB_AMPLITUDE);
    assert!(SPOT_PENUMBRA >= 0.0 && SPOT_PENUMBRA <= 1.0);
    assert!(SPOT_ANGLE > 0.0 && SPOT_ANGLE < std::f32::consts::FRAC_PI_2);

    assert!(GLITCH_TRIGGER_MIN_FRAMES > 0);
    assert!(GLITCH_TRIGGER_MAX_FRAMES >= GLITCH_TRIGGER_MIN_FRAMES);
    assert!(GLITCH_DISPLACEMENT_SIZE.is_power_of_two());

    assert!(DEFAULT_VOLUME >= 0.0 && DEFAULT_VOLUME <= 1.0);
}

#[test]
fn backdrop_sits_behind_the_model() {
    assert!(BACKDROP_Z < MODEL_POSITION.z);
    assert!(BACKDROP_TOP_COLOR > BACKDROP_BOTTOM_COLOR);
}

#[test]
fn dom_contract_ids() {
    assert_eq!(MUSIC_ICON_ID, "music-icon");
    assert_eq!(BACKGROUND_MUSIC_ID, "background-music");
    assert_eq!(VOLUME_CONTROL_ID, "volume-control");
    assert_eq!(VOLUME_SLIDER_ID, "volume-slider");
    assert_eq!(NAV_LINKS_SELECTOR, ".nav-links");
    assert!(MODEL_PATH.ends_with(".glb"));
}
