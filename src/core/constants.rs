use glam::Vec3;

// Shared animation and scene tuning constants. Hex colors are sRGB.

// Frame clock
pub const MAX_FRAME_DELTA_SEC: f32 = 0.25; // clamp for tab-suspend spikes

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.0, 2.4);

// Scroll-driven camera yaw
pub const ROTATION_SMOOTHING: f32 = 0.1; // fraction of remaining distance per frame

// Model placement and spin
pub const MODEL_SCALE: Vec3 = Vec3::new(4.0, 4.0, 5.0);
pub const MODEL_POSITION: Vec3 = Vec3::new(0.0, -5.0, 0.0);
pub const MODEL_SPIN_RATE: f32 = 0.2; // rad/s, clockwise

// Spot light color cycle
pub const COLOR_CYCLE_RATE: f32 = 0.5; // lerp units per second
pub const LIGHT_CYCLE_COLORS: [u32; 4] = [0x8000ff, 0x0000ff, 0xff0000, 0xffffff];

// Spot light orbit
pub const LIGHT_ORBIT_RADIUS: f32 = 10.0;
pub const LIGHT_ORBIT_RATE: f32 = 2.0;
pub const LIGHT_BOB_RATE: f32 = 0.5;
pub const LIGHT_BOB_AMPLITUDE: f32 = 5.0;
pub const LIGHT_BOB_OFFSET: f32 = 5.0;

// Spot light shape
pub const SPOT_TARGET: Vec3 = Vec3::new(0.0, -5.0, 0.0);
pub const SPOT_INTENSITY: f32 = 3.0;
pub const SPOT_DISTANCE: f32 = 100.0;
pub const SPOT_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
pub const SPOT_PENUMBRA: f32 = 0.5;
pub const SPOT_DECAY: f32 = 2.0;

// Key light
pub const DIR_LIGHT_INTENSITY: f32 = 2.0;
pub const DIR_LIGHT_POSITION: Vec3 = Vec3::new(1.0, 1.0, 2.0); // normalized at use
pub const DIR_LIGHT_COLOR: u32 = 0xffffff;

// Backdrop gradient plane
pub const BACKDROP_BOTTOM_COLOR: u32 = 0x000000;
pub const BACKDROP_TOP_COLOR: u32 = 0x2e2e2e;
pub const BACKDROP_Z: f32 = -10.0;
pub const BACKDROP_HALF_SIZE: f32 = 1.0;

// Scanline pass
pub const SCANLINE_INTENSITY: f32 = 0.1;
pub const SCANLINE_DENSITY: f32 = 800.0;
pub const SCANLINE_SPEED: f32 = 10.0;

// Glitch pass
pub const GLITCH_TRIGGER_MIN_FRAMES: u32 = 120;
pub const GLITCH_TRIGGER_MAX_FRAMES: u32 = 240;
pub const GLITCH_COLUMN_SPREAD: f32 = 0.05;
pub const GLITCH_DISPLACEMENT_SIZE: u32 = 64;

// Music panel
pub const PANEL_HIDE_DELAY_MS: u32 = 3000;
pub const DEFAULT_VOLUME: f64 = 0.4;
