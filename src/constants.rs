// DOM contract and asset locations used by the web frontend.

// Page elements
pub const CANVAS_ID: &str = "background-canvas";
pub const MUSIC_ICON_ID: &str = "music-icon";
pub const BACKGROUND_MUSIC_ID: &str = "background-music";
pub const VOLUME_CONTROL_ID: &str = "volume-control";
pub const VOLUME_SLIDER_ID: &str = "volume-slider";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";

// CSS classes toggled by the widgets
pub const NAV_ACTIVE_CLASS: &str = "active";
pub const PANEL_SHOW_CLASS: &str = "show";

// Static assets
pub const MODEL_PATH: &str = "assets/model.glb";

// Injected once at startup to hide WebKit scrollbars while keeping scroll
pub const HIDE_SCROLLBAR_CSS: &str = "body::-webkit-scrollbar { display: none; }";

// Render targets
pub const SCENE_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
