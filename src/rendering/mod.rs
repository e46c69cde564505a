//! Rendering module - camera offset and depth sorting.

mod camera;
mod plugin;

pub use camera::{camera_offset, depth_order, CameraOffset, DrawOrder, Viewport};
pub use plugin::RenderingPlugin;
