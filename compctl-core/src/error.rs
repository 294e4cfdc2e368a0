//! Error types shared by the core and the drivers

use compctl_hal::I2cBusError;
use compctl_protocol::FrameError;

/// Rejected argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// Write payload larger than one transaction can carry
    PayloadTooLarge,
    /// NVRAM offset outside 0-15
    NvramOffset(u8),
    /// Sleep request outside 1-524288 seconds
    SleepSeconds(u32),
}

/// Malformed channel specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatError {
    /// Byte index of the offending character
    pub position: usize,
    /// The offending byte (`None` when the input ended too early)
    pub byte: Option<u8>,
}

/// Errors surfaced by core operations and drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Transaction not acknowledged or failed in the bus primitive
    Bus(I2cBusError),
    /// Argument outside the accepted domain
    InvalidArgument(ArgumentError),
    /// Malformed channel specification
    Format(FormatError),
}

impl From<I2cBusError> for Error {
    fn from(e: I2cBusError) -> Self {
        Error::Bus(e)
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::PayloadTooLarge => Error::InvalidArgument(ArgumentError::PayloadTooLarge),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Error::InvalidArgument(e)
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Error::Format(e)
    }
}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArgumentError::PayloadTooLarge => f.write_str("write payload too large"),
            ArgumentError::NvramOffset(o) => {
                write!(f, "invalid address {}, valid addresses are 0-15", o)
            }
            ArgumentError::SleepSeconds(s) => write!(
                f,
                "invalid sleep time {}, maximum sleep time is 524288",
                s
            ),
        }
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.byte {
            Some(b) if b.is_ascii_graphic() => write!(
                f,
                "invalid channel format at position {}: '{}'",
                self.position, b as char
            ),
            Some(b) => write!(
                f,
                "invalid channel format at position {}: 0x{:02x}",
                self.position, b
            ),
            None => write!(f, "channel range at position {} has no end", self.position),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {}", e),
            Error::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
            Error::Format(e) => write!(f, "{}", e),
        }
    }
}
