//! The body the camera follows: acceleration, drag, and a speed cap.

use glam::Vec2;
use tidal_math::Rect;

/// Movement tuning for a [`Player`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    /// Acceleration toward the input direction, world units per second squared.
    pub acceleration: f32,
    /// Speed cap at zoom 1, world units per second.
    pub max_speed: f32,
    /// Fraction of velocity kept per physics step, in `(0, 1]`.
    pub ground_drag: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            acceleration: 700.0,
            max_speed: 240.0,
            ground_drag: 0.85,
        }
    }
}

/// A square body moving over the world.
///
/// Acceleration and the speed cap scale with `1 / zoom`, so the body covers
/// the same screen distance at any zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    position: Vec2,
    size: Vec2,
    velocity: Vec2,
    settings: PlayerSettings,
}

impl Player {
    /// Player of edge `size` centered on `center`, at rest.
    pub fn new(center: Vec2, size: f32, settings: PlayerSettings) -> Self {
        let size = Vec2::splat(size.max(0.0));
        Self {
            position: center - size / 2.0,
            size,
            velocity: Vec2::ZERO,
            settings,
        }
    }

    /// Top-left corner in world units.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Accelerate along `direction`, apply drag, then cap the speed.
    ///
    /// `direction` longer than 1 is shortened to unit length. A zero
    /// direction only applies drag.
    pub fn apply_physics(&mut self, direction: Vec2, dt: f32, zoom: f32) {
        let scale = zoom_scale(zoom);
        let dt = valid_dt(dt);
        let direction = direction.clamp_length_max(1.0);
        if direction.is_finite() && direction.length_squared() > 0.0 {
            self.velocity += direction * self.settings.acceleration * scale * dt;
        }
        self.velocity *= self.settings.ground_drag;
        self.velocity = self
            .velocity
            .clamp_length_max(self.settings.max_speed.max(0.0) * scale);
    }

    /// Run one physics step and move, staying inside `[0, bounds]`.
    ///
    /// Velocity along an axis drops to zero when the body hits that edge.
    pub fn update(&mut self, direction: Vec2, dt: f32, zoom: f32, bounds: Vec2) {
        self.apply_physics(direction, dt, zoom);
        let next = self.position + self.velocity * valid_dt(dt);
        let max = (bounds - self.size).max(Vec2::ZERO);
        let clamped = next.clamp(Vec2::ZERO, max);
        if clamped.x != next.x {
            self.velocity.x = 0.0;
        }
        if clamped.y != next.y {
            self.velocity.y = 0.0;
        }
        self.position = clamped;
    }
}

fn zoom_scale(zoom: f32) -> f32 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom.recip()
    } else {
        1.0
    }
}

fn valid_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
