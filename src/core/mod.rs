pub mod animation;
pub mod camera;
pub mod clock;
pub mod color_cycle;
pub mod constants;
pub mod frame_steps;
pub mod glitch;
pub mod light_orbit;
pub mod mixer;
pub mod model;
pub mod panel;
pub mod rotation;

pub use animation::*;
pub use camera::*;
pub use clock::*;
pub use color_cycle::*;
pub use constants::*;
pub use frame_steps::*;
pub use glitch::*;
pub use light_orbit::*;
pub use mixer::*;
pub use model::*;
pub use panel::*;
pub use rotation::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
