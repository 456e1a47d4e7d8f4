//! Locating and reading the CLI's TOML configuration file.

use std::{
    fs, io, iter,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use nodeweave::{NodeweaveError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for NodeweaveError {
    fn from(err: ConfigError) -> Self {
        NodeweaveError::Config(err.to_string())
    }
}

/// Project-local configuration, relative to the working directory.
const LOCAL_CONFIG: &str = "nodeweave/config.toml";

/// Load the configuration the CLI should run with.
///
/// An explicit path must exist. Without one, the first file found among
/// [`LOCAL_CONFIG`] and `config.toml` in the platform config directory is
/// used; if neither exists the defaults apply.
///
/// # Errors
///
/// Returns [`NodeweaveError::Config`] for a missing explicit file or
/// malformed TOML, and [`NodeweaveError::Io`] if the file cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, NodeweaveError> {
    let path = match explicit_path {
        Some(path) => path.as_ref().to_path_buf(),
        None => match discover_config() {
            Some(path) => path,
            None => {
                debug!("No configuration file found, using default configuration");
                return Ok(AppConfig::default());
            }
        },
    };

    info!(path:% = path.display(); "Loading configuration");
    read_config(&path)
}

fn discover_config() -> Option<PathBuf> {
    let platform = ProjectDirs::from("com", "nodeweave", "nodeweave")
        .map(|dirs| dirs.config_dir().join("config.toml"));

    iter::once(PathBuf::from(LOCAL_CONFIG))
        .chain(platform)
        .inspect(|path| debug!(path:% = path.display(); "Looking for configuration"))
        .find(|path| path.is_file())
}

fn read_config(path: &Path) -> Result<AppConfig, NodeweaveError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => {
            NodeweaveError::from(ConfigError::MissingFile(path.to_path_buf()))
        }
        _ => NodeweaveError::from(err),
    })?;

    toml::from_str(&content)
        .map_err(|err| ConfigError::Parse(err.message().to_string()).into())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use nodeweave::layout::LayoutEngine;

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\nengine = \"radial\"\nring_spacing = 150.0\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout().engine(), LayoutEngine::Radial);
        assert_eq!(config.layout().ring_spacing(), 150.0);
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, NodeweaveError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_malformed_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout\nengine = ").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_unreadable_explicit_path_is_io_error() {
        // A directory exists but cannot be read as a file.
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path())).unwrap_err();

        assert!(matches!(err, NodeweaveError::Io(_)));
    }
}
