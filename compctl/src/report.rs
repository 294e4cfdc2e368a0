//! Output formatting

use std::io::{self, Write};

use compctl_core::board::BoardInfo;
use compctl_core::{MacAddress, SampleReading};

/// One ADC reading: `[0x%08X, ch]=value`
pub fn write_reading<W: Write>(out: &mut W, counter: u32, reading: &SampleReading) -> io::Result<()> {
    writeln!(out, "[0x{:08X}, {}]={}", counter, reading.channel, reading.value)
}

/// Board information as `key=value` lines
pub fn write_info<W: Write>(out: &mut W, model: Option<&str>, info: &BoardInfo) -> io::Result<()> {
    if let Some(model) = model {
        writeln!(out, "model={}", model)?;
    }
    writeln!(out, "silabs_rev={}", info.revision)?;
    for rail in &info.rails {
        writeln!(out, "{}={}", rail.name, rail.millivolts)?;
    }
    writeln!(out, "hwaddr={}", info.mac)
}

/// MAC address as `HWaddr xx:xx:xx:xx:xx:xx`
pub fn write_mac<W: Write>(out: &mut W, mac: MacAddress) -> io::Result<()> {
    writeln!(out, "HWaddr {}", mac)
}
