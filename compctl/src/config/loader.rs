//! Configuration loading
//!
//! Reads the TOML file if present, otherwise falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::CtlConfig;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/compctl.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// TOML parsing failed
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser error
        source: toml::de::Error,
    },
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<CtlConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Load configuration from `path`
///
/// A missing file is not an error; the defaults are returned.
pub fn load(path: &Path) -> Result<CtlConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            return Ok(CtlConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!("loaded configuration from {}", path.display());
    log_config_summary(&config);
    Ok(config)
}

fn log_config_summary(config: &CtlConfig) {
    debug!("  bus device: {}", config.bus.device.display());
    debug!(
        "  model check: {} ({} from {})",
        config.board.check_model,
        config.board.models.join(", "),
        config.board.model_file.display()
    );
}
