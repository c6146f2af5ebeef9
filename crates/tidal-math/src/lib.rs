//! World-space and screen-space rectangles shared by the tidal crates.

mod rect;

pub use rect::{Rect, ScreenRect};
