//! One-time-programmed block
//!
//! Plain pass-through reads; interpretation is left to the caller.

use compctl_core::Error;
use compctl_hal::I2cBus;
use compctl_protocol::regmap::{OTP, OTP_LEN};
use compctl_protocol::RegisterAddress;

use crate::bus::RegisterBus;

/// OTP access
pub struct OtpReader<'a, B> {
    bus: &'a mut RegisterBus<B>,
}

impl<'a, B: I2cBus> OtpReader<'a, B> {
    /// Borrow `bus` for OTP reads
    pub fn new(bus: &'a mut RegisterBus<B>) -> Self {
        Self { bus }
    }

    /// Read `buf.len()` bytes at `addr` without decoding
    pub fn read_block(&mut self, addr: RegisterAddress, buf: &mut [u8]) -> Result<(), Error> {
        self.bus.read(addr, buf)
    }

    /// Read the 16-byte identity block
    pub fn read_identity(&mut self) -> Result<[u8; OTP_LEN], Error> {
        self.bus.read_array(OTP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn test_identity_passthrough() {
        let mut sim = SimBus::new();
        sim.memory[6..22].copy_from_slice(b"TS7800V2-OTP-ID!");
        let mut bus = RegisterBus::new(sim);

        assert_eq!(&bus.otp().read_identity().unwrap(), b"TS7800V2-OTP-ID!");
        assert_eq!(bus.inner().log[0].register(), 6);
    }

    #[test]
    fn test_read_block_any_address() {
        let mut sim = SimBus::new();
        sim.memory[10] = 0x5A;
        let mut bus = RegisterBus::new(sim);

        let mut buf = [0u8; 2];
        bus.otp().read_block(RegisterAddress::new(9), &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x5A]);
    }
}
