//! Companion controller register protocol
//!
//! The companion controller exposes a flat 16-bit register space over
//! I2C. Every transaction starts with the register offset as a 2-byte
//! big-endian pointer:
//!
//! ```text
//! write:  ┌──────────┬──────────┬─────────────────┐
//!         │ ADDR_HI  │ ADDR_LO  │ PAYLOAD         │
//!         │ 1B       │ 1B       │ 0–4094B         │
//!         └──────────┴──────────┴─────────────────┘
//!
//! read:   ┌──────────┬──────────┐ Sr ┌──────────────┐
//!         │ ADDR_HI  │ ADDR_LO  │ ─► │ N bytes (rd) │
//!         └──────────┴──────────┘    └──────────────┘
//! ```
//!
//! Multi-byte register fields are little-endian.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod regmap;

pub use frame::{FrameError, WriteFrame, ADDRESS_PREFIX_LEN, MAX_TRANSFER_SIZE, MAX_WRITE_PAYLOAD};
pub use regmap::{RegisterAddress, DEVICE_ADDRESS};
