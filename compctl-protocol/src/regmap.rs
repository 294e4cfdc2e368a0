//! Companion controller register map
//!
//! All regions are fixed; nothing here is discovered at runtime.

/// 7-bit bus address of the companion controller
pub const DEVICE_ADDRESS: u8 = 0x54;

/// Offset into the companion controller's 16-bit register space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterAddress(u16);

impl RegisterAddress {
    /// Create an address from a raw offset
    pub const fn new(offset: u16) -> Self {
        Self(offset)
    }

    /// Raw offset
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Address `n` bytes past this one
    pub const fn offset(self, n: u16) -> Self {
        Self(self.0.wrapping_add(n))
    }

    /// Big-endian pointer bytes sent ahead of every transaction
    pub const fn pointer(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for RegisterAddress {
    fn from(offset: u16) -> Self {
        Self(offset)
    }
}

impl core::fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-time-programmed calibration/identity block
pub const OTP: RegisterAddress = RegisterAddress::new(6);
/// Length of the OTP block
pub const OTP_LEN: usize = 16;

/// Watchdog reload value (u32, little-endian, deciseconds)
pub const WDT_RELOAD: RegisterAddress = RegisterAddress::new(1024);
/// Length of the watchdog reload register
pub const WDT_RELOAD_LEN: usize = 4;
/// Watchdog command register
pub const WDT_COMMAND: RegisterAddress = RegisterAddress::new(1028);

/// First ADC sample register (2 bytes per sample, little-endian)
pub const ADC_BASE: RegisterAddress = RegisterAddress::new(1280);
/// Last byte of the ADC sample block
pub const ADC_END: RegisterAddress = RegisterAddress::new(1535);
/// Bytes per ADC sample
pub const ADC_SAMPLE_WIDTH: usize = 2;
/// Window holding the five user ADC channels, highest channel first
pub const ADC_CHANNEL_WINDOW: RegisterAddress = RegisterAddress::new(1294);
/// Number of channels in the user ADC window
pub const ADC_WINDOW_CHANNELS: usize = 5;
/// Length of the user ADC window
pub const ADC_WINDOW_LEN: usize = ADC_WINDOW_CHANNELS * ADC_SAMPLE_WIDTH;
/// Supply rail samples at the start of the ADC block
pub const RAIL_BLOCK: RegisterAddress = ADC_BASE;
/// Number of supply rail samples
pub const RAIL_COUNT: usize = 7;
/// Length of the supply rail block
pub const RAIL_BLOCK_LEN: usize = RAIL_COUNT * ADC_SAMPLE_WIDTH;

/// Non-volatile byte store
pub const NVRAM: RegisterAddress = RegisterAddress::new(1536);
/// Length of the NVRAM window
pub const NVRAM_LEN: usize = 16;
/// MAC address, first six bytes of NVRAM
pub const MAC: RegisterAddress = NVRAM;
/// Length of the MAC address
pub const MAC_LEN: usize = 6;

/// Companion firmware revision byte
pub const REVISION: RegisterAddress = RegisterAddress::new(2048);
