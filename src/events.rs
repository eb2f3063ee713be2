pub mod resize;
pub mod scroll;

pub use resize::wire_resize;
pub use scroll::wire_scroll;
