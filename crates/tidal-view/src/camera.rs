//! 2D camera with eased zoom.

use glam::Vec2;
use tidal_math::{Rect, ScreenRect};
use tracing::debug;

/// Zoom limits and input tuning for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Lower bound for `target_zoom`.
    pub min_zoom: f32,
    /// Upper bound for `target_zoom`.
    pub max_zoom: f32,
    /// Fraction of the remaining zoom distance covered per update, in `(0, 1]`.
    pub smoothing: f32,
    /// Below this zoom [`draw_visible`](crate::draw_visible) draws nothing.
    pub cull_below_zoom: f32,
    /// Zoom change per unit of scroll wheel delta.
    pub scroll_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.5,
            smoothing: 0.1,
            cull_below_zoom: 0.4,
            scroll_step: 0.1,
        }
    }
}

impl CameraSettings {
    /// Settings the camera can run with: a non-positive or non-finite zoom
    /// bound or smoothing falls back to its default, and an inverted zoom
    /// range is swapped.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let lo = positive(self.min_zoom, defaults.min_zoom);
        let hi = positive(self.max_zoom, defaults.max_zoom);
        let smoothing = if self.smoothing > 0.0 && self.smoothing <= 1.0 {
            self.smoothing
        } else {
            defaults.smoothing
        };
        Self {
            min_zoom: lo.min(hi),
            max_zoom: lo.max(hi),
            smoothing,
            ..self
        }
    }
}

/// View onto the world: top-left `position` in world units and a zoom factor
/// that eases toward `target_zoom`.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    zoom: f32,
    target_zoom: f32,
    viewport: Vec2,
    settings: CameraSettings,
}

impl Camera {
    /// Camera at the world origin with zoom 1, clamped into the settings' range.
    /// Settings are passed through [`CameraSettings::sanitized`].
    pub fn new(viewport: Vec2, settings: CameraSettings) -> Self {
        let sanitized = settings.sanitized();
        if sanitized != settings {
            debug!(?settings, ?sanitized, "adjusted camera settings");
        }
        let settings = sanitized;
        let zoom = 1.0f32.clamp(settings.min_zoom, settings.max_zoom);
        Self {
            position: Vec2::ZERO,
            zoom,
            target_zoom: zoom,
            viewport,
            settings,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size;
    }

    /// Advance one frame: clamp the target zoom, center the view on `target`
    /// at the current zoom, then ease the zoom toward its target.
    pub fn update(&mut self, target: Vec2) {
        self.target_zoom = self
            .target_zoom
            .clamp(self.settings.min_zoom, self.settings.max_zoom);
        self.position = target - self.viewport / (2.0 * self.zoom);
        self.zoom += (self.target_zoom - self.zoom) * self.settings.smoothing;
    }

    /// Scale the target zoom. Repeated calls compound.
    pub fn zoom_by(&mut self, multiplier: f32) {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            debug!(multiplier, "ignoring zoom multiplier");
            return;
        }
        self.target_zoom = (self.target_zoom * multiplier)
            .clamp(self.settings.min_zoom, self.settings.max_zoom);
    }

    /// Mouse wheel input; positive deltas zoom in.
    pub fn scroll(&mut self, wheel_delta: f32) {
        self.zoom_by(1.0 + wheel_delta * self.settings.scroll_step);
    }

    /// Transform a world rectangle to pixels. The origin is floored and the
    /// size rounded up, so adjacent tiles never leave a one-pixel seam.
    pub fn apply(&self, world: Rect) -> ScreenRect {
        let origin = ((world.origin - self.position) * self.zoom).floor();
        let size = (world.size * self.zoom).ceil();
        ScreenRect::new(
            origin.x as i32,
            origin.y as i32,
            size.x as u32,
            size.y as u32,
        )
    }

    /// Alias of [`Camera::apply`].
    pub fn world_to_screen(&self, world: Rect) -> ScreenRect {
        self.apply(world)
    }

    /// World-space rectangle currently covered by the viewport.
    pub fn visible_world_rect(&self) -> Rect {
        Rect::new(self.position, self.viewport / self.zoom)
    }

    /// True when the zoom is below the configured cull threshold.
    pub fn culls_everything(&self) -> bool {
        self.zoom < self.settings.cull_below_zoom
    }
}
