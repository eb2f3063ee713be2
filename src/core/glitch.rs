use super::constants::{
    GLITCH_COLUMN_SPREAD, GLITCH_TRIGGER_MAX_FRAMES, GLITCH_TRIGGER_MIN_FRAMES,
};
use rand::prelude::*;
use std::f32::consts::PI;

/// Shader parameters for one glitch frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlitchParams {
    pub seed: f32,
    pub amount: f32,
    pub angle: f32,
    pub seed_x: f32,
    pub seed_y: f32,
    pub distortion_x: f32,
    pub distortion_y: f32,
    pub col_s: f32,
    pub bypass: bool,
}

/// Kind of glitch chosen for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlitchKind {
    Strong,
    Mild,
    Off,
}

/// Frame-counted glitch trigger.
///
/// A strong glitch fires whenever the frame counter is a multiple of the
/// current trigger period, after which the period is redrawn from
/// `[GLITCH_TRIGGER_MIN_FRAMES, GLITCH_TRIGGER_MAX_FRAMES]`. For the first
/// fifth of each period a milder glitch is applied; otherwise the pass is
/// bypassed.
pub struct GlitchPass {
    rng: StdRng,
    frame: u32,
    trigger: u32,
    params: GlitchParams,
    pub go_wild: bool,
}

impl GlitchPass {
    pub fn new(mut rng: StdRng) -> Self {
        let trigger = rng.gen_range(GLITCH_TRIGGER_MIN_FRAMES..=GLITCH_TRIGGER_MAX_FRAMES);
        Self {
            rng,
            frame: 0,
            trigger,
            params: GlitchParams {
                col_s: GLITCH_COLUMN_SPREAD,
                ..GlitchParams::default()
            },
            go_wild: false,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn trigger_period(&self) -> u32 {
        self.trigger
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn params(&self) -> &GlitchParams {
        &self.params
    }

    pub fn update(&mut self) -> (GlitchKind, GlitchParams) {
        let p = &mut self.params;
        p.seed = self.rng.gen::<f32>();
        p.bypass = false;
        let kind = if self.frame % self.trigger == 0 || self.go_wild {
            p.amount = self.rng.gen::<f32>() / 30.0;
            p.angle = self.rng.gen_range(-PI..PI);
            p.seed_x = self.rng.gen_range(-1.0..1.0);
            p.seed_y = self.rng.gen_range(-1.0..1.0);
            p.distortion_x = self.rng.gen_range(0.0..1.0);
            p.distortion_y = self.rng.gen_range(0.0..1.0);
            self.frame = 0;
            self.trigger =
                self.rng.gen_range(GLITCH_TRIGGER_MIN_FRAMES..=GLITCH_TRIGGER_MAX_FRAMES);
            GlitchKind::Strong
        } else if ((self.frame % self.trigger) as f32) < self.trigger as f32 / 5.0 {
            p.amount = self.rng.gen::<f32>() / 90.0;
            p.angle = self.rng.gen_range(-PI..PI);
            p.distortion_x = self.rng.gen_range(0.0..1.0);
            p.distortion_y = self.rng.gen_range(0.0..1.0);
            p.seed_x = self.rng.gen_range(-0.3..0.3);
            p.seed_y = self.rng.gen_range(-0.3..0.3);
            GlitchKind::Mild
        } else {
            p.bypass = true;
            GlitchKind::Off
        };
        self.frame += 1;
        (kind, self.params)
    }

    /// Random RGBA8 displacement texture, `size * size` texels.
    pub fn displacement_map(&mut self, size: u32) -> Vec<u8> {
        let texels = (size as usize) * (size as usize);
        let mut data = vec![0u8; texels * 4];
        for px in data.chunks_exact_mut(4) {
            px[0] = self.rng.gen();
            px[1] = self.rng.gen();
            px[2] = self.rng.gen();
            px[3] = 255;
        }
        data
    }
}
