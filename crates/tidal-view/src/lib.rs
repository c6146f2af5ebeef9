//! Camera, world-to-screen transform, and culled tile drawing.

mod camera;
mod draw;

pub use camera::{Camera, CameraSettings};
pub use draw::{TileRenderer, draw_visible};
