//! Tool-level errors

use std::io;
use std::path::PathBuf;

use compctl_hal::I2cBusError;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can end an invocation with a non-zero exit code
#[derive(Debug, Error)]
pub enum CtlError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Model file could not be read
    #[error("cannot read model from {path}: {source}")]
    ModelRead {
        /// Model file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Board model is not one this tool supports
    #[error("unsupported model {0:?}")]
    UnsupportedModel(String),

    /// Bus device could not be opened
    #[error("cannot initialize connection to the companion controller via {device}: {kind}")]
    Open {
        /// Bus character device
        device: PathBuf,
        /// Bus failure kind
        kind: I2cBusError,
    },

    /// Driver or argument failure
    #[error("{0}")]
    Core(compctl_core::Error),

    /// Malformed MAC address argument
    #[error("invalid MAC address {0:?}, expected xx:xx:xx:xx:xx:xx")]
    InvalidMac(String),

    /// NVRAM address outside 0-15
    #[error("invalid address {0}, valid addresses are 0-15")]
    InvalidAddress(u32),

    /// NVRAM data outside 0-255
    #[error("invalid data {0}, valid data is 0-255")]
    InvalidData(u32),

    /// Signal handler registration failed
    #[error("failed to register signal handler: {0}")]
    Signal(io::Error),

    /// Writing to stdout failed
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

impl From<compctl_core::Error> for CtlError {
    fn from(e: compctl_core::Error) -> Self {
        CtlError::Core(e)
    }
}

impl From<compctl_core::ArgumentError> for CtlError {
    fn from(e: compctl_core::ArgumentError) -> Self {
        CtlError::Core(e.into())
    }
}

impl From<compctl_core::FormatError> for CtlError {
    fn from(e: compctl_core::FormatError) -> Self {
        CtlError::Core(e.into())
    }
}

impl CtlError {
    /// True for a malformed channel specification
    pub fn is_channel_format(&self) -> bool {
        matches!(self, CtlError::Core(compctl_core::Error::Format(_)))
    }
}
