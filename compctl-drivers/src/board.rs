//! Board information report

use compctl_core::board::{decode_rails, BoardInfo};
use compctl_core::Error;
use compctl_hal::I2cBus;
use compctl_protocol::regmap::{RAIL_BLOCK, RAIL_BLOCK_LEN, REVISION};

use crate::bus::RegisterBus;
use crate::nvram::NvramStore;

/// Collects the companion-side fields of the board information report
pub struct BoardInfoReader<'a, B> {
    bus: &'a mut RegisterBus<B>,
}

impl<'a, B: I2cBus> BoardInfoReader<'a, B> {
    /// Borrow `bus` for the report
    pub fn new(bus: &'a mut RegisterBus<B>) -> Self {
        Self { bus }
    }

    /// Read revision, supply rails and MAC address
    ///
    /// Stops at the first failed read.
    pub fn read_info(&mut self) -> Result<BoardInfo, Error> {
        let [revision] = self.bus.read_array::<1>(REVISION)?;
        let block = self.bus.read_array::<RAIL_BLOCK_LEN>(RAIL_BLOCK)?;
        let mac = NvramStore::new(&mut *self.bus).read_mac()?;

        Ok(BoardInfo {
            revision,
            rails: decode_rails(&block),
            mac,
        })
    }
}
