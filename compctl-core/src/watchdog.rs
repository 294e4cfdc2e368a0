//! Watchdog and sleep command model
//!
//! The companion controller's watchdog is driven by two registers: a
//! 32-bit reload/countdown value and a command byte. Nothing about the
//! current state is cached on the host; each operation is an
//! unconditional command.

use compctl_protocol::frame::u32_le;

use crate::error::ArgumentError;

/// Reload value written by a feed, in deciseconds
pub const FEED_RELOAD_DECISECONDS: u32 = 800;

/// Reload payload written by a feed (800 little-endian)
pub const FEED_RELOAD: [u8; 4] = u32_le(FEED_RELOAD_DECISECONDS);

/// Command byte arming the watchdog
pub const CMD_ENABLE: u8 = 0x01;

/// Command byte arming the power-down countdown
pub const CMD_SLEEP: u8 = 0x02;

/// Payload written to the command register to disarm the watchdog
pub const DISABLE_PAYLOAD: [u8; 2] = [0x04, 0x04];

/// Longest sleep request in seconds
pub const MAX_SLEEP_SECONDS: u32 = 524_288;

/// Countdown units per second of sleep
pub const SLEEP_UNITS_PER_SECOND: u32 = 100;

/// Longest countdown accepted by the sleep sequence
pub const MAX_SLEEP_DECISECONDS: u32 = MAX_SLEEP_SECONDS * SLEEP_UNITS_PER_SECOND;

/// State commanded by a watchdog operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogState {
    /// Watchdog not armed
    Disabled,
    /// Watchdog armed; carries the reload when the operation programmed it
    Armed(Option<u32>),
    /// Power-down countdown armed
    SleepArmed(u32),
}

/// Convert a sleep request in seconds to the countdown value
///
/// Accepts 1 to 524288 seconds.
pub fn sleep_deciseconds(seconds: u32) -> Result<u32, ArgumentError> {
    if seconds == 0 || seconds > MAX_SLEEP_SECONDS {
        return Err(ArgumentError::SleepSeconds(seconds));
    }
    Ok(seconds * SLEEP_UNITS_PER_SECOND)
}

/// Reload register payload for a countdown
pub const fn reload_payload(deciseconds: u32) -> [u8; 4] {
    u32_le(deciseconds)
}
