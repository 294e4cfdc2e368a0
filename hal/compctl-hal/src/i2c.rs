//! I2C bus abstractions
//!
//! Provides the trait for I2C master operations used by the register
//! drivers, and the error kinds every backend reports.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Timeout
    Timeout,
    /// Overrun
    Overrun,
    /// Other error (including I/O failure of the host transaction primitive)
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl core::fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            I2cBusError::Bus => "bus error",
            I2cBusError::ArbitrationLost => "arbitration lost",
            I2cBusError::Nack => "device did not acknowledge",
            I2cBusError::Timeout => "timeout",
            I2cBusError::Overrun => "overrun",
            I2cBusError::Other => "transaction failed",
        };
        f.write_str(msg)
    }
}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Every call is one complete bus transaction.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: Into<I2cBusError>;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    /// The bus is not released between the two phases.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }
}
