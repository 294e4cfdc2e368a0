//! Linux backend for the compctl HAL
//!
//! Implements [`compctl_hal::I2cBus`] on top of the kernel i2c-dev
//! interface. Every trait call becomes one `I2C_RDWR` ioctl, so a
//! `write_read` keeps bus ownership across the repeated start.

#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{LinuxBusConfig, LinuxI2cBus};

/// Blocking delay backed by `std::thread::sleep`
pub use linux_embedded_hal::Delay;
