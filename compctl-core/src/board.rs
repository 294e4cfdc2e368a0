//! Supply rail decoding for the board information report
//!
//! The first seven ADC words hold the on-board supply rails. Each is
//! scaled by a fixed per-rail factor over a 1024-step reference.

use compctl_protocol::frame::read_u16_le;
use compctl_protocol::regmap::{ADC_SAMPLE_WIDTH, RAIL_BLOCK_LEN, RAIL_COUNT};

use crate::adc::SAMPLE_MASK;
use crate::mac::MacAddress;

/// Divisor for supply rail scaling
pub const RAIL_DIVISOR: u32 = 1024;

/// Rail names and scale factors, in register order
pub const RAILS: [(&str, u32); RAIL_COUNT] = [
    ("cpu_core", 2500),
    ("ram_1350", 2500),
    ("v_1200", 2500),
    ("v_1800", 2500),
    ("v_8_30", 2500),
    ("v_5va", 5682),
    ("an_3300", 5000),
];

/// One decoded supply rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RailReading {
    /// Report name of the rail
    pub name: &'static str,
    /// 10-bit magnitude
    pub raw: u16,
    /// Scaled value in millivolts
    pub millivolts: u32,
}

/// Everything the board information report shows from the companion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardInfo {
    /// Companion firmware revision
    pub revision: u8,
    /// Supply rails in register order
    pub rails: [RailReading; RAIL_COUNT],
    /// MAC address from NVRAM
    pub mac: MacAddress,
}

/// Decode the supply rail block
pub fn decode_rails(block: &[u8; RAIL_BLOCK_LEN]) -> [RailReading; RAIL_COUNT] {
    core::array::from_fn(|i| {
        let (name, scale) = RAILS[i];
        let raw = read_u16_le(block, i * ADC_SAMPLE_WIDTH).unwrap_or(0) & SAMPLE_MASK;
        RailReading {
            name,
            raw,
            millivolts: scale * raw as u32 / RAIL_DIVISOR,
        }
    })
}
