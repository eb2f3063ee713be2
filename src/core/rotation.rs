use super::constants::{MODEL_SPIN_RATE, ROTATION_SMOOTHING};
use std::f32::consts::TAU;

/// Normalize a vertical scroll offset into `[0, 1]`.
///
/// `scroll_height` is the document's full height and `viewport_height` the
/// visible part. A page that cannot scroll maps to `0.0`.
pub fn scroll_fraction(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if !range.is_finite() || range <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0) as f32
}

/// Camera yaw that eases toward a scroll-derived target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraYaw {
    pub current: f32,
    pub target: f32,
}

impl CameraYaw {
    /// One full turn over the whole scrollable page.
    pub fn set_scroll_target(&mut self, scroll_fraction: f32) {
        let f = if scroll_fraction.is_finite() {
            scroll_fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.target = TAU * f;
    }

    // Fixed per-frame factor; delta is ignored.
    pub fn advance(&mut self, _delta: f32) -> f32 {
        self.current += ROTATION_SMOOTHING * (self.target - self.current);
        self.current
    }
}

/// Continuous clockwise spin of the loaded model about Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelSpin {
    pub angle: f32,
}

impl ModelSpin {
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.angle -= delta.max(0.0) * MODEL_SPIN_RATE;
        self.angle
    }
}
