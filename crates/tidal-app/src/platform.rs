//! OS directory resolution for config and log files.

use std::path::{Path, PathBuf};

use crate::error::AppError;

const APP_NAME: &str = "tidal";

/// Where the runner keeps `config.ron` and `tidal.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the platform config directory (XDG on Linux, Known Folders on
    /// Windows, Library on macOS) without touching the disk.
    ///
    /// # Errors
    ///
    /// [`AppError::NoConfigDir`] if the OS exposes no configuration directory.
    pub fn resolve() -> Result<Self, AppError> {
        let base = dirs::config_dir().ok_or(AppError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&base))
    }

    /// Use an explicit config directory (the `--config` flag) if given,
    /// otherwise the platform default.
    pub fn resolve_or(config_override: Option<&Path>) -> Result<Self, AppError> {
        match config_override {
            Some(dir) => Ok(Self {
                config_dir: dir.to_path_buf(),
                log_dir: dir.join("logs"),
            }),
            None => Self::resolve(),
        }
    }

    /// Directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            log_dir: app_dir.join("logs"),
            config_dir: app_dir,
        }
    }

    /// Create both directories on disk.
    pub fn create_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| AppError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
