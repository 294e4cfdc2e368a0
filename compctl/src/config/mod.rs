//! Tool configuration
//!
//! Loaded from a TOML file; every key has a default so the file is
//! optional.

mod loader;

use std::path::PathBuf;

use compctl_hal_linux::LinuxBusConfig;
use serde::Deserialize;

pub use loader::{load, parse_config, ConfigError, DEFAULT_CONFIG_PATH};

/// Complete tool configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CtlConfig {
    /// Bus settings
    pub bus: BusConfig,
    /// Board identification
    pub board: BoardConfig,
}

/// Bus settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Character device of the bus
    pub device: PathBuf,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            device: LinuxBusConfig::default().device,
        }
    }
}

impl BusConfig {
    /// Backend configuration for opening the bus
    pub fn to_linux(&self) -> LinuxBusConfig {
        LinuxBusConfig {
            device: self.device.clone(),
        }
    }
}

/// Board identification settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Require a model match before touching the bus
    pub check_model: bool,
    /// File holding the hardware model string
    pub model_file: PathBuf,
    /// Accepted model strings (case-insensitive substring match)
    pub models: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            check_model: true,
            model_file: PathBuf::from("/proc/device-tree/model"),
            models: vec!["TS-7800v2".into(), "TS-7800-v2".into()],
        }
    }
}
