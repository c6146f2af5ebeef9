//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tidal_view::CameraSettings;
use tidal_world::{PlayerSettings, SimulationRates};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// World size and seed.
    pub world: WorldConfig,
    /// Diffusion rates and per-frame budget.
    pub simulation: SimulationConfig,
    /// Zoom limits and input tuning.
    pub camera: CameraConfig,
    /// Movement of the body the camera follows.
    pub player: PlayerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// World generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile edge length in world units.
    pub tile_size: f32,
    /// Generation seed.
    pub seed: u64,
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub heat_diffuse_rate: f32,
    pub water_diffuse_rate: f32,
    pub water_cooling: f32,
    pub evap_per_degree: f32,
    pub regrowth_rate: f32,
    pub decay_rate: f32,
    pub heat_stress_decay: f32,
    /// Maximum tiles updated per frame.
    pub update_budget: u32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Fraction of the remaining zoom distance covered per frame.
    pub smoothing: f32,
    /// Skip drawing entirely below this zoom.
    pub cull_below_zoom: f32,
    /// Zoom change per scroll wheel notch.
    pub scroll_step: f32,
}

/// Player movement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub acceleration: f32,
    /// Speed cap at zoom 1.
    pub max_speed: f32,
    /// Fraction of velocity kept per frame.
    pub ground_drag: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Frames the headless runner simulates before exiting.
    pub frames: u32,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 720,
            title: "Tidal".to_string(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 150,
            height: 150,
            tile_size: 16.0,
            seed: 0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let rates = SimulationRates::default();
        Self {
            heat_diffuse_rate: rates.heat_diffuse_rate,
            water_diffuse_rate: rates.water_diffuse_rate,
            water_cooling: rates.water_cooling,
            evap_per_degree: rates.evap_per_degree,
            regrowth_rate: rates.regrowth_rate,
            decay_rate: rates.decay_rate,
            heat_stress_decay: rates.heat_stress_decay,
            update_budget: 6000,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self {
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            smoothing: settings.smoothing,
            cull_below_zoom: settings.cull_below_zoom,
            scroll_step: settings.scroll_step,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let settings = PlayerSettings::default();
        Self {
            acceleration: settings.acceleration,
            max_speed: settings.max_speed,
            ground_drag: settings.ground_drag,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 600,
        }
    }
}

// --- Bridges into the simulation crates ---

impl SimulationConfig {
    pub fn rates(&self) -> SimulationRates {
        SimulationRates {
            heat_diffuse_rate: self.heat_diffuse_rate,
            water_diffuse_rate: self.water_diffuse_rate,
            water_cooling: self.water_cooling,
            evap_per_degree: self.evap_per_degree,
            regrowth_rate: self.regrowth_rate,
            decay_rate: self.decay_rate,
            heat_stress_decay: self.heat_stress_decay,
        }
    }
}

impl CameraConfig {
    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            smoothing: self.smoothing,
            cull_below_zoom: self.cull_below_zoom,
            scroll_step: self.scroll_step,
        }
    }
}

impl PlayerConfig {
    pub fn settings(&self) -> PlayerSettings {
        PlayerSettings {
            acceleration: self.acceleration,
            max_speed: self.max_speed,
            ground_drag: self.ground_drag,
        }
    }
}

// --- Load / Save / Reload ---

/// Where [`Config::open`] got its config from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// Default config written to a new file.
    Created(PathBuf),
}

impl ConfigOrigin {
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(path) | Self::Created(path) => path,
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let (config, origin) = Self::open(config_dir)?;
        match &origin {
            ConfigOrigin::Loaded(path) => log::info!("Loaded config from {}", path.display()),
            ConfigOrigin::Created(path) => log::info!("Created default config at {}", path.display()),
        }
        Ok(config)
    }

    /// Like [`Config::load_or_create`], but reports where the config came
    /// from instead of logging it. For callers that set up logging after
    /// reading the config.
    pub fn open(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            config.validate()?;
            Ok((config, ConfigOrigin::Loaded(config_path)))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created(config_path)))
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            new_config.validate()?;
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: String) -> Result<(), ConfigError> {
            Err(ConfigError::InvalidValue { field, reason })
        }

        if self.world.width == 0 || self.world.height == 0 {
            return invalid(
                "world size",
                format!("{}x{} has no tiles", self.world.width, self.world.height),
            );
        }
        if !self.world.tile_size.is_finite() || self.world.tile_size <= 0.0 {
            return invalid(
                "world.tile_size",
                format!("{} is not a positive length", self.world.tile_size),
            );
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid(
                "window size",
                format!("{}x{} is empty", self.window.width, self.window.height),
            );
        }

        let cam = &self.camera;
        if !(cam.min_zoom > 0.0 && cam.min_zoom <= cam.max_zoom && cam.max_zoom.is_finite()) {
            return invalid(
                "camera zoom range",
                format!("[{}, {}] is not a positive range", cam.min_zoom, cam.max_zoom),
            );
        }
        if !(cam.smoothing > 0.0 && cam.smoothing <= 1.0) {
            return invalid(
                "camera.smoothing",
                format!("{} is outside (0, 1]", cam.smoothing),
            );
        }

        let player = &self.player;
        if !(player.acceleration >= 0.0 && player.acceleration.is_finite()) {
            return invalid(
                "player.acceleration",
                format!("{} is not a finite non-negative rate", player.acceleration),
            );
        }
        if !(player.max_speed >= 0.0 && player.max_speed.is_finite()) {
            return invalid(
                "player.max_speed",
                format!("{} is not a finite non-negative speed", player.max_speed),
            );
        }
        if !(player.ground_drag > 0.0 && player.ground_drag <= 1.0) {
            return invalid(
                "player.ground_drag",
                format!("{} is outside (0, 1]", player.ground_drag),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("width: 1200"), "missing window width in {ron_str}");
        assert!(ron_str.contains("update_budget: 6000"));
    }

    #[test]
    fn test_defaults_match_simulation_crates() {
        let config = Config::default();
        assert_eq!(config.simulation.rates(), SimulationRates::default());
        assert_eq!(config.camera.settings(), CameraSettings::default());
        assert_eq!(config.player.settings(), PlayerSettings::default());
        assert_eq!((config.world.width, config.world.height), (150, 150));
        assert_eq!(config.world.tile_size, 16.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.world.seed = u64::MAX;
        config.simulation.evap_per_degree = 0.000_37;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(world: (seed: 7), debug: (frames: 3))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.width, 150);
        assert_eq!(config.debug.frames, 3);
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_bridges_carry_overrides() {
        let mut config = Config::default();
        config.simulation.decay_rate = 0.5;
        config.camera.max_zoom = 8.0;
        assert_eq!(config.simulation.rates().decay_rate, 0.5);
        assert_eq!(config.camera.settings().max_zoom, 8.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.width = 64;
        config.world.seed = 42;
        config.window.title = "test".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("tidal");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.simulation.update_budget = 100;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.simulation.update_budget), Some(100));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got {err:?}");
        assert!(err.to_string().contains(CONFIG_FILE), "message: {err}");
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "(world: (width: 0))").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "got {err:?}");
    }

    #[test]
    fn test_validate_catches_bad_camera() {
        let mut config = Config::default();
        config.camera.min_zoom = 4.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.camera.smoothing = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.world.tile_size = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// tidal settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_open_reports_origin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let (created, origin) = Config::open(dir.path()).unwrap();
        assert_eq!(origin, ConfigOrigin::Created(path.clone()));
        assert_eq!(created, Config::default());

        let (loaded, origin) = Config::open(dir.path()).unwrap();
        assert_eq!(origin, ConfigOrigin::Loaded(path.clone()));
        assert_eq!(origin.path(), path.as_path());
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_validate_catches_bad_player() {
        let mut config = Config::default();
        config.player.ground_drag = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.player.max_speed = f32::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("player.max_speed"), "message: {err}");
    }
}
