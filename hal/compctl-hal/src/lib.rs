//! compctl Hardware Abstraction Layer
//!
//! This crate defines the bus abstraction that the register drivers are
//! written against. A platform backend (Linux i2c-dev, a simulated bus in
//! tests) implements it; everything above it stays platform independent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  compctl (binary) / compctl-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  compctl-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ compctl-hal-  │       │  simulated    │
//! │    linux      │       │  bus (tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key items at crate root for convenience
pub use i2c::{I2cBus, I2cBusError};
