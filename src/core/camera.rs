use super::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_POSITION};
use glam::{Mat4, Vec3};

/// Browser viewport in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Backing-store size in physical pixels, never smaller than 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
            self.pixel_ratio
        } else {
            1.0
        };
        let w = (self.css_width.max(0.0) * ratio).floor() as u32;
        let h = (self.css_height.max(0.0) * ratio).floor() as u32;
        (w.max(1), h.max(1))
    }
}

/// Right-handed perspective camera that only rotates about Y.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub aspect: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: CAMERA_POSITION,
            yaw: 0.0,
            aspect,
            fovy_degrees: CAMERA_FOV_DEGREES,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Recompute the aspect ratio for a new viewport size.
    ///
    /// Returns `false` and keeps the previous aspect when `height` is zero.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 || !width.is_finite() {
            return false;
        }
        self.aspect = (width / height) as f32;
        true
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_degrees.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw)).inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
