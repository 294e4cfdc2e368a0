//! NVRAM byte store
//!
//! Sixteen bytes at a fixed register window; the first six hold the MAC
//! address.

use compctl_core::{ArgumentError, Error, MacAddress};
use compctl_hal::I2cBus;
use compctl_protocol::regmap::{MAC, MAC_LEN, NVRAM, NVRAM_LEN};

use crate::bus::RegisterBus;

/// Byte offset into NVRAM (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NvramOffset(u8);

impl NvramOffset {
    /// Validate an offset
    pub fn new(offset: u8) -> Result<Self, ArgumentError> {
        if offset as usize >= NVRAM_LEN {
            return Err(ArgumentError::NvramOffset(offset));
        }
        Ok(Self(offset))
    }

    /// Raw offset
    pub fn get(self) -> u8 {
        self.0
    }
}

/// NVRAM access
pub struct NvramStore<'a, B> {
    bus: &'a mut RegisterBus<B>,
}

impl<'a, B: I2cBus> NvramStore<'a, B> {
    /// Borrow `bus` for NVRAM access
    pub fn new(bus: &'a mut RegisterBus<B>) -> Self {
        Self { bus }
    }

    /// Read one byte
    pub fn read_byte(&mut self, offset: NvramOffset) -> Result<u8, Error> {
        let [value] = self.bus.read_array::<1>(NVRAM.offset(offset.0 as u16))?;
        Ok(value)
    }

    /// Write one byte
    pub fn write_byte(&mut self, offset: NvramOffset, value: u8) -> Result<(), Error> {
        self.bus.write(NVRAM.offset(offset.0 as u16), &[value])
    }

    /// Read the whole NVRAM window
    pub fn read_block(&mut self) -> Result<[u8; NVRAM_LEN], Error> {
        self.bus.read_array(NVRAM)
    }

    /// Read the MAC address as one 6-byte block
    pub fn read_mac(&mut self) -> Result<MacAddress, Error> {
        let bytes = self.bus.read_array::<MAC_LEN>(MAC)?;
        Ok(MacAddress::from_nvram(bytes))
    }

    /// Store the MAC address as one 6-byte block
    pub fn write_mac(&mut self, mac: MacAddress) -> Result<(), Error> {
        self.bus.write(MAC, &mac.to_nvram())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn test_byte_roundtrip() {
        let mut bus = RegisterBus::new(SimBus::new());
        let offset = NvramOffset::new(5).unwrap();

        bus.nvram().write_byte(offset, 0xAB).unwrap();
        assert_eq!(bus.nvram().read_byte(offset).unwrap(), 0xAB);
        assert_eq!(bus.inner().log[0].register(), 1541);
    }

    #[test]
    fn test_offset_domain() {
        assert!(NvramOffset::new(15).is_ok());
        assert_eq!(NvramOffset::new(16), Err(ArgumentError::NvramOffset(16)));
    }

    #[test]
    fn test_mac_stored_reversed() {
        let mut bus = RegisterBus::new(SimBus::new());
        let mac = MacAddress::parse("00:d0:69:01:02:03").unwrap();

        bus.nvram().write_mac(mac).unwrap();
        assert_eq!(bus.inner().log.len(), 1);
        assert_eq!(bus.inner().memory[1536..1542], [0x03, 0x02, 0x01, 0x69, 0xD0, 0x00]);
        assert_eq!(bus.nvram().read_mac().unwrap(), mac);
    }

    #[test]
    fn test_read_block() {
        let mut sim = SimBus::new();
        for (i, b) in sim.memory[1536..1552].iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut bus = RegisterBus::new(sim);
        let block = bus.nvram().read_block().unwrap();
        assert_eq!(block[15], 15);
        assert_eq!(bus.inner().log.len(), 1);
    }
}
