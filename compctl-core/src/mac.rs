//! MAC address stored in NVRAM
//!
//! The address is kept in the first six NVRAM bytes in reverse order:
//! offset 5 holds the first octet shown to the user.

use compctl_protocol::regmap::MAC_LEN;

/// MAC address in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress(pub [u8; MAC_LEN]);

impl MacAddress {
    /// Parse `xx:xx:xx:xx:xx:xx` (hex octets, case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let mut octets = [0u8; MAC_LEN];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next()?.trim();
            if part.is_empty() || part.len() > 2 {
                return None;
            }
            *octet = u8::from_str_radix(part, 16).ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        Some(Self(octets))
    }

    /// Build from the NVRAM byte order
    pub fn from_nvram(bytes: [u8; MAC_LEN]) -> Self {
        let mut octets = bytes;
        octets.reverse();
        Self(octets)
    }

    /// Bytes as stored in NVRAM
    pub fn to_nvram(self) -> [u8; MAC_LEN] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }
}

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}
