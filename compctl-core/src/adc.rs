//! ADC sample decoding
//!
//! The companion controller stores 10-bit samples as little-endian u16
//! words. The five user channels sit in a window ordered from the highest
//! channel to the lowest, so channel `n` lives at word `4 - n`.

use heapless::Vec;

use compctl_protocol::frame::read_u16_le;
use compctl_protocol::regmap::{ADC_SAMPLE_WIDTH, ADC_WINDOW_CHANNELS, ADC_WINDOW_LEN};

use crate::channels::ChannelMask;

/// Significant bits of a sample word
pub const SAMPLE_MASK: u16 = 0x3FF;

/// Full-scale input of the user channels in millivolts
///
/// Every user channel shares this factor; it is carried on each
/// [`SampleReading`] as `full_scale_mv`.
pub const FULL_SCALE_MV: u32 = 5000;

/// Divisor applied to the user channels (`raw * 5000 / 1023`)
pub const FULL_SCALE_DIVISOR: u32 = 1023;

/// Output mode of the sampling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleMode {
    /// Emit the 10-bit magnitude as read
    Raw,
    /// Emit the millivolt approximation
    #[default]
    Millivolts,
}

/// One decoded channel sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReading {
    /// Logical channel (0-4)
    pub channel: u8,
    /// 10-bit magnitude (0-1023)
    pub raw: u16,
    /// Millivolts at raw full scale (1023)
    pub full_scale_mv: u32,
    /// Value emitted for the selected [`SampleMode`]
    pub value: u32,
}

impl SampleReading {
    /// Raw magnitude converted with this channel's scale factor
    pub const fn millivolts(&self) -> u32 {
        self.full_scale_mv * self.raw as u32 / FULL_SCALE_DIVISOR
    }
}

/// Readings of all selected channels from one pass over the window
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleBatch {
    /// Pass number, starting at 0
    pub iteration: u32,
    /// Readings in ascending channel order
    pub readings: Vec<SampleReading, ADC_WINDOW_CHANNELS>,
}

/// Convert a raw sample to millivolts
///
/// Integer arithmetic with truncation; `1023` maps to exactly `5000`.
pub const fn scale_millivolts(raw: u16) -> u32 {
    FULL_SCALE_MV * raw as u32 / FULL_SCALE_DIVISOR
}

/// Decode the sample of `channel` from the user channel window
///
/// Returns `None` for channels outside the window or a short buffer.
pub fn decode_channel(window: &[u8], channel: u8) -> Option<u16> {
    let channel = channel as usize;
    if channel >= ADC_WINDOW_CHANNELS {
        return None;
    }
    let word = ADC_WINDOW_CHANNELS - 1 - channel;
    read_u16_le(window, word * ADC_SAMPLE_WIDTH).map(|w| w & SAMPLE_MASK)
}

/// Decode every channel selected in `mask`
pub fn decode_window(
    window: &[u8; ADC_WINDOW_LEN],
    mask: ChannelMask,
    mode: SampleMode,
    iteration: u32,
) -> SampleBatch {
    let mut batch = SampleBatch {
        iteration,
        readings: Vec::new(),
    };

    for channel in mask.channels() {
        let Some(raw) = decode_channel(window, channel) else {
            continue;
        };
        let value = match mode {
            SampleMode::Raw => raw as u32,
            SampleMode::Millivolts => scale_millivolts(raw),
        };
        // At most five channels, always fits
        let _ = batch.readings.push(SampleReading {
            channel,
            raw,
            full_scale_mv: FULL_SCALE_MV,
            value,
        });
    }

    batch
}
