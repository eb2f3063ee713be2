use crate::core::{
    run_frame_steps, AnimationMixer, FrameClock, FrameStep, FrameUpdate, GlitchParams, GlitchPass,
    MixerError, ModelData, NodePose, PerspectiveCamera, SceneAnimation, Viewport,
    GLITCH_DISPLACEMENT_SIZE,
};
use crate::render;
use glam::Mat4;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A decoded model plus its animation state.
pub struct LoadedModel {
    pub data: ModelData,
    pub poses: Vec<NodePose>,
    pub mixer: Option<AnimationMixer>,
    matrices: Vec<Mat4>,
}

impl LoadedModel {
    pub fn new(mut data: ModelData) -> Self {
        let poses = data.rest_poses();
        let clips = std::mem::take(&mut data.clips);
        let mixer = (!clips.is_empty()).then(|| AnimationMixer::new(clips));
        let matrices = data.world_matrices(&poses);
        Self {
            data,
            poses,
            mixer,
            matrices,
        }
    }
}

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub camera: PerspectiveCamera,
    pub animation: SceneAnimation,
    pub model: Option<LoadedModel>,
    pub glitch: GlitchPass,
    pub clock: FrameClock,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
        glitch: GlitchPass,
    ) -> Self {
        let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
        Self {
            canvas,
            gpu,
            camera: PerspectiveCamera::new(aspect),
            animation: SceneAnimation::new(),
            model: None,
            glitch,
            clock: FrameClock::new(),
        }
    }

    /// One animation frame: advance every animated value, then draw.
    ///
    /// A failing step is logged and skipped; the remaining steps still run.
    pub fn frame(&mut self) {
        let delta = self.clock.tick(Instant::now());
        let mut update: Option<FrameUpdate> = None;
        let mut glitch: Option<GlitchParams> = None;

        run_frame_steps(|step| -> anyhow::Result<()> {
            match step {
                FrameStep::Mixer => self.update_model(delta)?,
                FrameStep::Animation => {
                    let u = self.animation.advance(delta);
                    self.camera.yaw = u.camera_yaw;
                    update = Some(u);
                }
                FrameStep::Glitch => glitch = Some(self.glitch.update().1),
                FrameStep::Render => {
                    if let (Some(u), Some(gl)) = (&update, &glitch) {
                        self.render(u, gl)?;
                    }
                }
            }
            Ok(())
        });
    }

    fn update_model(&mut self, delta: f32) -> Result<(), MixerError> {
        let Some(model) = &mut self.model else {
            return Ok(());
        };
        let result = match &mut model.mixer {
            Some(mixer) => mixer.update(delta, &mut model.poses),
            None => Ok(()),
        };
        model.matrices = model.data.world_matrices(&model.poses);
        result
    }

    fn render(
        &mut self,
        update: &FrameUpdate,
        glitch: &GlitchParams,
    ) -> Result<(), wgpu::SurfaceError> {
        let Some(g) = &mut self.gpu else {
            return Ok(());
        };
        let node_matrices = self
            .model
            .as_ref()
            .map(|m| m.matrices.as_slice())
            .unwrap_or(&[]);
        let frame = render::RenderFrame {
            view_proj: self.camera.view_projection(),
            light_color: update.light_color,
            light_position: update.light_position,
            model_spin: update.model_spin,
            node_matrices,
            glitch,
            scanline_time: update.scanline_time,
        };
        g.render(&frame)
    }

    /// Apply a new browser viewport to the camera, canvas and renderer.
    pub fn resize(&mut self, viewport: Viewport) {
        if !self
            .camera
            .set_viewport(viewport.css_width, viewport.css_height)
        {
            log::debug!("[resize] ignoring degenerate viewport {:?}", viewport);
            return;
        }
        let (w, h) = viewport.physical_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", viewport.css_width));
        _ = style.set_property("height", &format!("{}px", viewport.css_height));
        if let Some(g) = &mut self.gpu {
            g.resize(w, h);
        }
    }

    pub fn on_scroll(&mut self, fraction: f32) {
        self.animation.set_scroll_target(fraction);
    }

    pub fn attach_model(&mut self, data: ModelData) {
        if let Some(g) = &mut self.gpu {
            g.upload_model(&data);
        }
        log::info!(
            "[model] loaded: {} node(s), {} clip(s)",
            data.nodes.len(),
            data.clips.len()
        );
        self.model = Some(LoadedModel::new(data));
        self.animation.mark_model_loaded();
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    glitch: &mut GlitchPass,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let displacement = glitch.displacement_map(GLITCH_DISPLACEMENT_SIZE);
    match render::GpuState::new(leaked_canvas, &displacement).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
