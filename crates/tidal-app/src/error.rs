use tidal_config::ConfigError;
use tidal_log::TryInitError;
use tidal_world::WorldError;

/// Top-level failure of the tidal runner.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("world setup failed: {0}")]
    World(#[from] WorldError),

    #[error("failed to create {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install logger: {0}")]
    Logging(#[from] TryInitError),
}
