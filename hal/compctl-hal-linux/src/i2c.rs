//! i2c-dev bus driver

use std::path::PathBuf;

use compctl_hal::{I2cBus, I2cBusError};
use embedded_hal::i2c::{Error as _, I2c};
use linux_embedded_hal::{I2CError, I2cdev};
use log::{debug, warn};

/// Bus device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinuxBusConfig {
    /// Character device of the bus (e.g. `/dev/i2c-0`)
    pub device: PathBuf,
}

impl Default for LinuxBusConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/i2c-0"),
        }
    }
}

/// An open i2c-dev bus
///
/// Owns the underlying file handle for its whole lifetime.
pub struct LinuxI2cBus {
    dev: I2cdev,
}

impl LinuxI2cBus {
    /// Open the bus device named in `config`
    pub fn open(config: &LinuxBusConfig) -> Result<Self, I2cBusError> {
        debug!("opening {}", config.device.display());
        let dev = I2cdev::new(&config.device).map_err(|e| {
            warn!("cannot open {}: {}", config.device.display(), e);
            map_error(&I2CError::from(e))
        })?;
        Ok(Self { dev })
    }
}

fn map_error(e: &I2CError) -> I2cBusError {
    I2cBusError::from(e.kind())
}

impl I2cBus for LinuxI2cBus {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.dev.write(address, data).map_err(|e| map_error(&e))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.dev.read(address, buf).map_err(|e| map_error(&e))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.dev
            .write_read(address, write_data, read_buf)
            .map_err(|e| map_error(&e))
    }
}
