//! Headless driver for the tidal island simulation.
//!
//! Wires configuration, world generation, the budgeted simulator, and the
//! camera into a per-frame [`Session`].

mod error;
mod headless;
mod platform;
mod session;

pub use error::AppError;
pub use headless::CountingRenderer;
pub use platform::AppDirs;
pub use session::{FrameReport, Session};
