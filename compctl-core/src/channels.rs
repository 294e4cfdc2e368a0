//! ADC channel selection
//!
//! Parses channel specifications such as `"0-2,4"` or `"1 3 4"` into a
//! [`ChannelMask`]. Tokens `6` and `7` are accepted as aliases and folded
//! onto mask bits 4 and 5 to match the header pin wiring.

use crate::error::FormatError;

/// Number of user ADC channels
pub const CHANNEL_COUNT: u8 = 5;

/// Logical channel to header pin mapping
pub const CHANNEL_PINS: [(u8, u8); CHANNEL_COUNT as usize] = [(0, 1), (1, 3), (2, 5), (3, 7), (4, 9)];

/// Usage text shown when a channel specification is rejected
pub const USAGE: &str = "Invalid format, Sample ADC channels CHANS, e.g. \"0-2,4\", \"1,3,4\"\n\
\tCh | Pin\n\
\t---+----\n\
\t 0 | 1\n\
\t 1 | 3\n\
\t 2 | 5\n\
\t 3 | 7\n\
\t 4 | 9\n";

/// Set of selected ADC channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMask(u8);

impl ChannelMask {
    /// No channels selected
    pub const EMPTY: Self = Self(0);

    /// All five user channels
    pub const ALL: Self = Self((1 << CHANNEL_COUNT) - 1);

    /// Build a mask from raw bits, applying the pin remap
    pub const fn from_bits(bits: u8) -> Self {
        Self(remap(bits))
    }

    /// Parse a channel specification
    ///
    /// Accepts digits, `a-b` ranges, and `,` or space separators. A dash
    /// without a preceding digit, a dangling dash, or any other byte fails
    /// with a [`FormatError`] naming the offending position.
    pub fn parse(spec: &str) -> Result<Self, FormatError> {
        let mut bits: u8 = 0;
        let mut last: Option<u8> = None;
        let mut dash: Option<usize> = None;

        for (position, &byte) in spec.as_bytes().iter().enumerate() {
            match byte {
                b'0'..=b'4' | b'6' | b'7' => {
                    let ch = byte - b'0';
                    match dash.take() {
                        // Range end; the start stays anchored for "1-2-3"
                        Some(_) => {
                            if let Some(start) = last {
                                for c in start..=ch {
                                    bits |= 1 << c;
                                }
                            }
                        }
                        None => {
                            last = Some(ch);
                            bits |= 1 << ch;
                        }
                    }
                }
                b'-' => {
                    if last.is_none() {
                        return Err(FormatError {
                            position,
                            byte: Some(byte),
                        });
                    }
                    dash = Some(position);
                }
                b',' | b' ' => {}
                _ => {
                    return Err(FormatError {
                        position,
                        byte: Some(byte),
                    })
                }
            }
        }

        if let Some(position) = dash {
            return Err(FormatError {
                position: position + 1,
                byte: None,
            });
        }

        Ok(Self::from_bits(bits))
    }

    /// Raw mask bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether `channel` is selected
    pub const fn contains(self, channel: u8) -> bool {
        channel < 8 && self.0 & (1 << channel) != 0
    }

    /// Check whether no channel is selected
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Selected user channels, lowest first
    pub fn channels(self) -> impl Iterator<Item = u8> {
        (0..CHANNEL_COUNT).filter(move |&ch| self.contains(ch))
    }
}

/// Fold alias bits 6 and 7 onto bits 4 and 5
const fn remap(mut bits: u8) -> u8 {
    // channel 6 => bit 4
    if bits & (1 << 6) != 0 {
        bits |= 1 << 4;
        bits &= !(1 << 6);
    }

    // channel 7 => bit 5
    if bits & (1 << 7) != 0 {
        bits |= 1 << 5;
        bits &= !(1 << 7);
    }

    bits
}
