use super::constants::{
    LIGHT_BOB_AMPLITUDE, LIGHT_BOB_OFFSET, LIGHT_BOB_RATE, LIGHT_ORBIT_RADIUS, LIGHT_ORBIT_RATE,
};
use glam::Vec3;

/// Spot light orbit around the Y axis with a slow vertical bob.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightOrbit {
    pub elapsed: f32,
}

impl LightOrbit {
    pub fn advance(&mut self, delta: f32) -> Vec3 {
        self.elapsed += delta.max(0.0);
        Self::position_at(self.elapsed)
    }

    pub fn position(&self) -> Vec3 {
        Self::position_at(self.elapsed)
    }

    #[inline]
    pub fn position_at(t: f32) -> Vec3 {
        Vec3::new(
            (t * LIGHT_ORBIT_RATE).sin() * LIGHT_ORBIT_RADIUS,
            ((t * LIGHT_BOB_RATE).sin() * LIGHT_BOB_AMPLITUDE + LIGHT_BOB_OFFSET).abs(),
            (t * LIGHT_ORBIT_RATE).cos() * LIGHT_ORBIT_RADIUS,
        )
    }
}
