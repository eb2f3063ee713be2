use super::constants::{COLOR_CYCLE_RATE, LIGHT_CYCLE_COLORS};
use glam::Vec3;

const PALETTE_LEN: usize = LIGHT_CYCLE_COLORS.len();

/// Convert a `0xRRGGBB` sRGB color into linear RGB.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Cyclic blend through the spot light palette.
///
/// `cursor` indexes the current color; the next color is always the one
/// after it, wrapping to the start of the palette.
#[derive(Clone, Debug)]
pub struct ColorCycle {
    palette: [Vec3; PALETTE_LEN],
    cursor: usize,
    lerp: f32,
    completed: u64,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCycle {
    pub fn new() -> Self {
        Self {
            palette: LIGHT_CYCLE_COLORS.map(hex_to_linear),
            cursor: 0,
            lerp: 0.0,
            completed: 0,
        }
    }

    pub fn current(&self) -> Vec3 {
        self.palette[self.cursor]
    }

    pub fn next(&self) -> Vec3 {
        self.palette[(self.cursor + 1) % PALETTE_LEN]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn lerp_factor(&self) -> f32 {
        self.lerp
    }

    /// Number of full color transitions finished so far.
    pub fn completed_transitions(&self) -> u64 {
        self.completed
    }

    /// Advance the blend and return this frame's light color.
    ///
    /// Reaching 1.0 restarts the blend at 0.0 (any overshoot is dropped) and
    /// moves the cursor one step.
    pub fn advance(&mut self, delta: f32) -> Vec3 {
        self.lerp += delta.max(0.0) * COLOR_CYCLE_RATE;
        if self.lerp >= 1.0 {
            self.lerp = 0.0;
            self.cursor = (self.cursor + 1) % PALETTE_LEN;
            self.completed += 1;
        }
        self.color()
    }

    pub fn color(&self) -> Vec3 {
        self.current().lerp(self.next(), self.lerp)
    }
}
