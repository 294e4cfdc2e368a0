//! Transaction framing for the companion controller.
//!
//! Frame format (write):
//! - ADDR (2 bytes): register offset, big-endian
//! - PAYLOAD (0-4094 bytes): bytes stored from ADDR upward
//!
//! The kernel limits one message to 4096 bytes, two of which are taken by
//! the address prefix. Oversized payloads are rejected, never truncated.

use heapless::Vec;

use crate::regmap::RegisterAddress;

/// Largest single bus message in bytes
pub const MAX_TRANSFER_SIZE: usize = 4096;

/// Size of the register pointer that prefixes every transaction
pub const ADDRESS_PREFIX_LEN: usize = 2;

/// Maximum payload size of one write transaction
pub const MAX_WRITE_PAYLOAD: usize = MAX_TRANSFER_SIZE - ADDRESS_PREFIX_LEN;

/// Errors that can occur during frame encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::PayloadTooLarge => write!(
                f,
                "payload exceeds {} bytes per transaction",
                MAX_WRITE_PAYLOAD
            ),
        }
    }
}

/// A complete write transaction: address prefix followed by the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFrame {
    bytes: Vec<u8, MAX_TRANSFER_SIZE>,
}

impl WriteFrame {
    /// Build the frame for writing `payload` at `addr`
    pub fn new(addr: RegisterAddress, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_WRITE_PAYLOAD {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(&addr.pointer())
            .map_err(|_| FrameError::PayloadTooLarge)?;
        bytes
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self { bytes })
    }

    /// Wire bytes of the whole transaction
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload portion, without the address prefix
    pub fn payload(&self) -> &[u8] {
        &self.bytes[ADDRESS_PREFIX_LEN..]
    }

    /// Register the payload starts at
    pub fn address(&self) -> RegisterAddress {
        RegisterAddress::new(u16::from_be_bytes([self.bytes[0], self.bytes[1]]))
    }
}

/// Decode the little-endian u16 at byte offset `at`
///
/// Returns `None` if `buf` is too short.
pub fn read_u16_le(buf: &[u8], at: usize) -> Option<u16> {
    let bytes = buf.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Decode the little-endian u32 at byte offset `at`
pub fn read_u32_le(buf: &[u8], at: usize) -> Option<u32> {
    let bytes = buf.get(at..at + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Encode a u32 register value
pub const fn u32_le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}
