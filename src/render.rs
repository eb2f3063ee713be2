use crate::constants::SCENE_COLOR_FORMAT;
use crate::core::{placement_matrix, GlitchParams, ModelData};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;
use scene::{SceneResources, SceneUniforms};
use targets::RenderTargets;

/// Everything the renderer needs to draw one frame.
pub struct RenderFrame<'f> {
    pub view_proj: Mat4,
    pub light_color: Vec3,
    pub light_position: Vec3,
    /// `None` until the model has loaded; the model pass is skipped then.
    pub model_spin: Option<f32>,
    /// World matrices of the model's nodes before placement.
    pub node_matrices: &'f [Mat4],
    pub glitch: &'f GlitchParams,
    pub scanline_time: f32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    scene: SceneResources,
    post: post::PostResources,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        displacement: &[u8],
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let scene = SceneResources::new(&device);
        let post = post::PostResources::new(
            &device,
            &queue,
            &targets.scene_view,
            &targets.glitch_view,
            SCENE_COLOR_FORMAT,
            format,
            displacement,
        );
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene,
            post,
            width,
            height,
        })
    }

    /// Reconfigure the swapchain and offscreen targets for a new backing size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) == (self.width, self.height) && self.targets.size() == (width, height)
        {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.post
            .rebuild_bind_groups(&self.device, &self.targets.scene_view, &self.targets.glitch_view);
    }

    pub fn upload_model(&mut self, model: &ModelData) {
        self.scene.upload_model(&self.device, model);
    }

    pub fn render(&mut self, frame: &RenderFrame<'_>) -> Result<(), wgpu::SurfaceError> {
        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("[gpu] surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draw_model = frame.model_spin.is_some() && self.scene.has_model();
        let placement = placement_matrix(frame.model_spin.unwrap_or(0.0));
        self.scene.write_uniforms(
            &self.queue,
            &SceneUniforms::new(frame.view_proj, frame.light_position, frame.light_color),
            placement,
            frame.node_matrices,
        );
        self.post
            .write_uniforms(&self.queue, frame.glitch, frame.scanline_time);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.scene.encode(
            &mut encoder,
            &self.targets.scene_view,
            &self.targets.depth_view,
            draw_model,
        );
        helpers::blit(
            &mut encoder,
            "glitch_pass",
            &self.targets.glitch_view,
            &self.post.glitch_pipeline,
            &self.post.glitch_bg,
        );
        helpers::blit(
            &mut encoder,
            "scanline_pass",
            &view,
            &self.post.scan_pipeline,
            &self.post.scan_bg,
        );
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
