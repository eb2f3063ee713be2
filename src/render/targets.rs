use super::helpers;
use crate::constants::{DEPTH_FORMAT, SCENE_COLOR_FORMAT};

/// Offscreen targets for the composer chain.
///
/// - `scene_*` receives the lit scene and feeds the glitch pass.
/// - `depth_*` is the scene pass depth buffer.
/// - `glitch_*` receives the glitch pass and feeds the scanline pass,
///   which writes straight to the swapchain.
pub(crate) struct RenderTargets {
    pub(crate) scene: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    _depth: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    _glitch: wgpu::Texture,
    pub(crate) glitch_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (scene, scene_view) = helpers::create_color_texture(
            device,
            "scene_color",
            width,
            height,
            SCENE_COLOR_FORMAT,
            sampled,
        );
        let (depth, depth_view) = helpers::create_color_texture(
            device,
            "scene_depth",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (glitch, glitch_view) = helpers::create_color_texture(
            device,
            "glitch_color",
            width,
            height,
            SCENE_COLOR_FORMAT,
            sampled,
        );
        Self {
            scene,
            scene_view,
            _depth: depth,
            depth_view,
            _glitch: glitch,
            glitch_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.scene.width(), self.scene.height())
    }
}
