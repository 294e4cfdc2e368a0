//! Register drivers for the companion controller
//!
//! This crate provides the bus protocol driver and the operations built on
//! top of it:
//!
//! - [`RegisterBus`] - framed register reads and writes
//! - [`AdcSampler`] - cancellable sampling loop over the user ADC channels
//! - [`WatchdogController`] - feed, enable, disable and sleep sequences
//! - [`NvramStore`] - NVRAM bytes and the MAC address
//! - [`OtpReader`] - one-time-programmed identity block
//! - [`BoardInfoReader`] - revision, supply rails and MAC for the info report
//!
//! All components borrow the [`RegisterBus`] for the duration of a call and
//! cache nothing; the hardware is the single source of truth.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;
pub mod bus;
pub mod nvram;
pub mod otp;
pub mod sampler;
pub mod watchdog;

#[cfg(test)]
mod sim;

pub use board::BoardInfoReader;
pub use bus::RegisterBus;
pub use nvram::{NvramOffset, NvramStore};
pub use otp::OtpReader;
pub use sampler::{AdcSampler, SAMPLE_INTERVAL_MS};
pub use watchdog::{WatchdogController, WatchdogReport, WatchdogStep};
