//! Board-agnostic core logic for the companion controller
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Channel specification parsing and pin remapping
//! - ADC sample decoding and scaling
//! - Watchdog/sleep command encoding and range validation
//! - MAC address model
//! - Supply rail decoding for the board information report
//! - The error type shared by the drivers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod board;
pub mod channels;
pub mod error;
pub mod mac;
pub mod watchdog;

pub use adc::{SampleBatch, SampleMode, SampleReading};
pub use channels::ChannelMask;
pub use error::{ArgumentError, Error, FormatError};
pub use mac::MacAddress;
pub use watchdog::WatchdogState;
