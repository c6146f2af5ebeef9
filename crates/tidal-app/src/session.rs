//! One running world: simulator, camera, and the player the camera follows.

use glam::Vec2;
use tidal_config::Config;
use tidal_terrain::{GeneratorParams, WorldGenerator};
use tidal_view::{Camera, TileRenderer, draw_visible};
use tidal_world::{DiffusionSimulator, Player};
use tracing::{info, trace};

use crate::error::AppError;

/// What one call to [`Session::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// 1-based index of the frame just run.
    pub frame: u64,
    pub tiles_updated: usize,
    pub tiles_drawn: usize,
    /// Simulator cursor after the step.
    pub cursor: usize,
}

pub struct Session {
    simulator: DiffusionSimulator,
    camera: Camera,
    player: Player,
    budget: u32,
    frame: u64,
}

impl Session {
    /// Generate the configured world, place the player at its centre, and
    /// center the camera on the player.
    ///
    /// # Errors
    ///
    /// [`AppError::World`] if the configured world dimensions or tile size
    /// are invalid.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let generator = WorldGenerator::new(GeneratorParams {
            tile_size: config.world.tile_size,
            ..GeneratorParams::default()
        });
        let grid = generator.generate(config.world.width, config.world.height, config.world.seed)?;
        let player = Player::new(
            grid.world_size() / 2.0,
            grid.tile_size(),
            config.player.settings(),
        );

        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let mut camera = Camera::new(viewport, config.camera.settings());
        camera.update(player.center());

        info!(
            width = grid.width(),
            height = grid.height(),
            seed = config.world.seed,
            budget = config.simulation.update_budget,
            "session started"
        );

        Ok(Self {
            simulator: DiffusionSimulator::new(grid, config.simulation.rates()),
            camera,
            player,
            budget: config.simulation.update_budget,
            frame: 0,
        })
    }

    /// Run one frame of `dt` seconds: move the player along `direction`,
    /// follow it with the camera, advance the simulation by the frame
    /// budget, and draw the visible tiles.
    pub fn frame<R: TileRenderer + ?Sized>(
        &mut self,
        direction: Vec2,
        dt: f32,
        renderer: &mut R,
    ) -> FrameReport {
        let bounds = self.simulator.grid().world_size();
        self.player.update(direction, dt, self.camera.zoom(), bounds);
        self.camera.update(self.player.center());
        let tiles_updated = self.simulator.step(self.budget);
        let tiles_drawn = draw_visible(&self.camera, self.simulator.grid(), renderer);
        self.frame += 1;

        let report = FrameReport {
            frame: self.frame,
            tiles_updated,
            tiles_drawn,
            cursor: self.simulator.grid().next_update_index(),
        };
        trace!(?report, "frame");
        report
    }

    /// World point the camera centers on.
    pub fn focus(&self) -> Vec2 {
        self.player.center()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn frames_run(&self) -> u64 {
        self.frame
    }

    pub fn simulator(&self) -> &DiffusionSimulator {
        &self.simulator
    }

    /// Entry point for grow/burn interactions.
    pub fn simulator_mut(&mut self) -> &mut DiffusionSimulator {
        &mut self.simulator
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
