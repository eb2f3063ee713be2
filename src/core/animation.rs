use super::color_cycle::ColorCycle;
use super::light_orbit::LightOrbit;
use super::rotation::{CameraYaw, ModelSpin};
use glam::Vec3;

/// Values produced by one animation step, consumed by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub camera_yaw: f32,
    /// `None` until the model has loaded.
    pub model_spin: Option<f32>,
    pub light_color: Vec3,
    pub light_position: Vec3,
    pub scanline_time: f32,
}

/// All per-frame animation state of the backdrop.
///
/// Created once at startup and advanced by the frame driver. Advancing runs
/// the steps in a fixed order: model spin and camera yaw, light color,
/// light position, then the scanline shader clock.
#[derive(Clone, Debug, Default)]
pub struct SceneAnimation {
    pub yaw: CameraYaw,
    spin: ModelSpin,
    model_loaded: bool,
    colors: ColorCycle,
    light: LightOrbit,
    scanline_time: f32,
}

impl SceneAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scroll_target(&mut self, scroll_fraction: f32) {
        self.yaw.set_scroll_target(scroll_fraction);
    }

    /// Enables the model spin from the next frame on.
    pub fn mark_model_loaded(&mut self) {
        self.model_loaded = true;
    }

    pub fn model_loaded(&self) -> bool {
        self.model_loaded
    }

    pub fn colors(&self) -> &ColorCycle {
        &self.colors
    }

    pub fn light(&self) -> &LightOrbit {
        &self.light
    }

    pub fn advance(&mut self, delta: f32) -> FrameUpdate {
        let delta = delta.max(0.0);
        let model_spin = self.model_loaded.then(|| self.spin.advance(delta));
        let camera_yaw = self.yaw.advance(delta);
        let light_color = self.colors.advance(delta);
        let light_position = self.light.advance(delta);
        self.scanline_time += delta;
        FrameUpdate {
            camera_yaw,
            model_spin,
            light_color,
            light_position,
            scanline_time: self.scanline_time,
        }
    }
}
