// Host-side tests for camera projection and viewport handling.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}

use camera::*;
use constants::*;
use glam::{Vec3, Vec4};

#[test]
fn resize_sets_aspect_exactly() {
    let mut cam = PerspectiveCamera::new(1.0);
    assert!(cam.set_viewport(1920.0, 1080.0));
    assert_eq!(cam.aspect, (1920.0_f64 / 1080.0) as f32);
    assert!(cam.set_viewport(800.0, 600.0));
    assert_eq!(cam.aspect, (800.0_f64 / 600.0) as f32);
}

#[test]
fn degenerate_viewport_keeps_previous_aspect() {
    let mut cam = PerspectiveCamera::new(2.0);
    assert!(!cam.set_viewport(800.0, 0.0));
    assert!(!cam.set_viewport(800.0, f64::NAN));
    assert!(!cam.set_viewport(f64::INFINITY, 600.0));
    assert_eq!(cam.aspect, 2.0);
}

#[test]
fn projection_tracks_new_aspect() {
    let mut cam = PerspectiveCamera::new(1.0);
    let before = cam.projection_matrix();
    cam.set_viewport(2000.0, 1000.0);
    let after = cam.projection_matrix();
    assert!((after.x_axis.x * 2.0 - before.x_axis.x).abs() < 1e-5);
    assert_eq!(after.y_axis.y, before.y_axis.y);
}

#[test]
fn camera_looks_down_negative_z() {
    let cam = PerspectiveCamera::new(1.0);
    assert_eq!(cam.position, CAMERA_POSITION);
    let ahead = cam.view_matrix() * Vec4::new(0.0, 1.0, -5.0, 1.0);
    assert!(ahead.z < 0.0);
    assert!(ahead.x.abs() < 1e-5);
}

#[test]
fn yaw_rotates_view_about_y() {
    let mut cam = PerspectiveCamera::new(1.0);
    cam.yaw = std::f32::consts::FRAC_PI_2;
    // Turned a quarter left, the point on -X is now straight ahead
    let p = cam.view_matrix() * Vec4::new(-5.0, 1.0, CAMERA_POSITION.z, 1.0);
    let v = Vec3::new(p.x, p.y, p.z);
    assert!(v.x.abs() < 1e-4, "{:?}", v);
    assert!(v.z < 0.0);
}

#[test]
fn physical_size_scales_by_pixel_ratio() {
    let vp = Viewport {
        css_width: 1280.0,
        css_height: 720.0,
        pixel_ratio: 2.0,
    };
    assert_eq!(vp.physical_size(), (2560, 1440));
    let odd = Viewport {
        css_width: 333.3,
        css_height: 0.0,
        pixel_ratio: f64::NAN,
    };
    assert_eq!(odd.physical_size(), (333, 1));
}
