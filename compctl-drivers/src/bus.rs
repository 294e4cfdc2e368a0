//! Register bus driver
//!
//! Frames every access to the companion controller as a single I2C
//! transaction starting with the 2-byte big-endian register pointer.
//! Reads use a repeated start so the bus is never released between the
//! pointer write and the data phase.
//!
//! There is no locking here: another process opening the same bus can
//! interleave its own transactions with ours.

use core::sync::atomic::AtomicBool;

use compctl_core::adc::SampleMode;
use compctl_core::{ChannelMask, Error};
use compctl_hal::I2cBus;
use compctl_protocol::{RegisterAddress, WriteFrame, DEVICE_ADDRESS};
use embedded_hal::delay::DelayNs;
use log::debug;

use crate::board::BoardInfoReader;
use crate::nvram::NvramStore;
use crate::otp::OtpReader;
use crate::sampler::AdcSampler;
use crate::watchdog::WatchdogController;

/// Register-level access to the companion controller
///
/// Owns the bus handle for its lifetime.
pub struct RegisterBus<B> {
    bus: B,
}

impl<B: I2cBus> RegisterBus<B> {
    /// Bind the bus to the companion controller's fixed address
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Read `buf.len()` bytes starting at `addr`
    ///
    /// On failure `buf` is zeroed so no partial data reaches the caller.
    pub fn read(&mut self, addr: RegisterAddress, buf: &mut [u8]) -> Result<(), Error> {
        let pointer = addr.pointer();
        match self.bus.write_read(DEVICE_ADDRESS, &pointer, buf) {
            Ok(()) => Ok(()),
            Err(e) => {
                buf.fill(0);
                let e = e.into();
                debug!("read of {} bytes at {} failed: {}", buf.len(), addr, e);
                Err(Error::Bus(e))
            }
        }
    }

    /// Read a fixed-size block starting at `addr`
    pub fn read_array<const N: usize>(&mut self, addr: RegisterAddress) -> Result<[u8; N], Error> {
        let mut buf = [0u8; N];
        self.read(addr, &mut buf)?;
        Ok(buf)
    }

    /// Write `payload` starting at `addr`
    ///
    /// Payloads over 4094 bytes fail with `InvalidArgument` before anything
    /// is sent.
    pub fn write(&mut self, addr: RegisterAddress, payload: &[u8]) -> Result<(), Error> {
        let frame = WriteFrame::new(addr, payload)?;
        self.bus
            .write(DEVICE_ADDRESS, frame.as_bytes())
            .map_err(|e| {
                let e = e.into();
                debug!("write of {} bytes at {} failed: {}", payload.len(), addr, e);
                Error::Bus(e)
            })
    }

    /// Watchdog and sleep control
    pub fn watchdog(&mut self) -> WatchdogController<'_, B> {
        WatchdogController::new(self)
    }

    /// NVRAM and MAC address access
    pub fn nvram(&mut self) -> NvramStore<'_, B> {
        NvramStore::new(self)
    }

    /// One-time-programmed block access
    pub fn otp(&mut self) -> OtpReader<'_, B> {
        OtpReader::new(self)
    }

    /// Board information report
    pub fn board(&mut self) -> BoardInfoReader<'_, B> {
        BoardInfoReader::new(self)
    }

    /// Start a sampling loop over the channels in `mask`
    pub fn sampler<'a, D: DelayNs>(
        &'a mut self,
        mask: ChannelMask,
        mode: SampleMode,
        cancel: &'a AtomicBool,
        delay: D,
    ) -> AdcSampler<'a, B, D> {
        AdcSampler::new(self, mask, mode, cancel, delay)
    }

    /// Underlying bus
    pub fn inner(&self) -> &B {
        &self.bus
    }

    /// Underlying bus, mutably
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimBus, Transaction};
    use compctl_core::ArgumentError;
    use compctl_hal::I2cBusError;
    use compctl_protocol::MAX_WRITE_PAYLOAD;

    #[test]
    fn test_write_single_framed_transaction() {
        let mut bus = RegisterBus::new(SimBus::new());
        bus.write(RegisterAddress::new(0x0604), &[0xAA, 0xBB]).unwrap();

        let log = &bus.inner().log;
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0],
            Transaction::Write {
                address: DEVICE_ADDRESS,
                bytes: vec![0x06, 0x04, 0xAA, 0xBB],
                acked: true,
            }
        );
    }

    #[test]
    fn test_write_at_limit() {
        let mut bus = RegisterBus::new(SimBus::new());
        let payload = vec![0x11u8; MAX_WRITE_PAYLOAD];
        bus.write(RegisterAddress::new(0x1000), &payload).unwrap();
        assert_eq!(bus.inner().log.len(), 1);
        assert_eq!(bus.inner().memory[0x1000 + MAX_WRITE_PAYLOAD - 1], 0x11);
    }

    #[test]
    fn test_oversized_write_never_sent() {
        let mut bus = RegisterBus::new(SimBus::new());
        let payload = vec![0u8; MAX_WRITE_PAYLOAD + 1];
        let result = bus.write(RegisterAddress::new(6), &payload);

        assert_eq!(
            result,
            Err(Error::InvalidArgument(ArgumentError::PayloadTooLarge))
        );
        assert!(bus.inner().log.is_empty());
    }

    #[test]
    fn test_read_uses_repeated_start() {
        let mut sim = SimBus::new();
        sim.memory[2048] = 7;
        let mut bus = RegisterBus::new(sim);

        let rev: [u8; 1] = bus.read_array(RegisterAddress::new(2048)).unwrap();
        assert_eq!(rev, [7]);
        assert_eq!(
            bus.inner().log[0],
            Transaction::WriteRead {
                address: DEVICE_ADDRESS,
                pointer: vec![0x08, 0x00],
                len: 1,
                acked: true,
            }
        );
    }

    #[test]
    fn test_failed_read_returns_no_data() {
        let mut sim = SimBus::new();
        sim.memory[1536..1542].copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        sim.fail_next(1);
        let mut bus = RegisterBus::new(sim);

        let mut buf = [0xEEu8; 6];
        let result = bus.read(RegisterAddress::new(1536), &mut buf);
        assert_eq!(result, Err(Error::Bus(I2cBusError::Nack)));
        assert_eq!(buf, [0u8; 6]);
    }

    #[test]
    fn test_write_nack() {
        let mut sim = SimBus::new();
        sim.fail_at(1028);
        let mut bus = RegisterBus::new(sim);
        assert_eq!(
            bus.write(RegisterAddress::new(1028), &[1]),
            Err(Error::Bus(I2cBusError::Nack))
        );
    }
}
