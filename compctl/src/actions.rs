//! Requested actions and their execution order

use std::io::{self, Write};
use std::sync::atomic::AtomicBool;

use compctl_core::watchdog::sleep_deciseconds;
use compctl_core::{ChannelMask, MacAddress, SampleMode};
use compctl_drivers::{NvramOffset, RegisterBus};
use compctl_hal::I2cBus;
use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::cli::Cli;
use crate::error::CtlError;
use crate::report;

/// Timeout passed when feeding; the controller reloads a fixed value
const FEED_TIMEOUT_SECONDS: u32 = 8;

/// Validated set of actions for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub feed: bool,
    pub disable: bool,
    pub info: bool,
    pub sampling: Option<(ChannelMask, SampleMode)>,
    pub nvram_write: Option<(NvramOffset, u8)>,
    pub set_mac: Option<MacAddress>,
    pub show_mac: bool,
    pub dump_nvram: bool,
    pub dump_otp: bool,
    /// Sleep duration in controller units
    pub sleep: Option<u32>,
}

impl Plan {
    /// Validate every argument before the bus is touched
    pub fn from_cli(cli: &Cli) -> Result<Self, CtlError> {
        let sleep = cli.sleep.map(sleep_deciseconds).transpose()?;

        let sampling = match (&cli.raw, &cli.sample) {
            (Some(chans), _) => Some((ChannelMask::parse(chans)?, SampleMode::Raw)),
            (None, Some(chans)) => Some((ChannelMask::parse(chans)?, SampleMode::Millivolts)),
            (None, None) => None,
        };

        let nvram_write = match (cli.addr, cli.data) {
            (Some(addr), Some(data)) => {
                let offset = u8::try_from(addr)
                    .ok()
                    .and_then(|a| NvramOffset::new(a).ok())
                    .ok_or(CtlError::InvalidAddress(addr))?;
                let value = u8::try_from(data).map_err(|_| CtlError::InvalidData(data))?;
                Some((offset, value))
            }
            _ => None,
        };

        let (set_mac, show_mac) = match cli.mac.as_deref() {
            None => (None, false),
            Some("") => (None, true),
            Some(s) => {
                let mac = MacAddress::parse(s).ok_or_else(|| CtlError::InvalidMac(s.to_owned()))?;
                (Some(mac), true)
            }
        };

        Ok(Self {
            feed: cli.feed,
            disable: cli.disable,
            info: cli.info,
            sampling,
            nvram_write,
            set_mac,
            show_mac,
            dump_nvram: cli.nvram,
            dump_otp: cli.otp,
            sleep,
        })
    }

    /// True when nothing was requested
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Run `plan` against the controller
///
/// Order: feed, disable, info, sampling (until cancelled), NVRAM write,
/// MAC set, MAC display, NVRAM dump, OTP dump, sleep. Watchdog failures
/// are logged by the controller and do not stop the run; everything else
/// fails fast.
pub fn execute<B, D, W>(
    plan: &Plan,
    bus: &mut RegisterBus<B>,
    model: Option<&str>,
    cancel: &AtomicBool,
    delay: D,
    out: &mut W,
) -> Result<(), CtlError>
where
    B: I2cBus,
    D: DelayNs,
    W: Write,
{
    if plan.feed {
        bus.watchdog().feed(FEED_TIMEOUT_SECONDS);
    }
    if plan.disable {
        bus.watchdog().disable();
    }

    if plan.info {
        let info = bus.board().read_info()?;
        report::write_info(out, model, &info)?;
    }

    if let Some((mask, mode)) = plan.sampling {
        sample(bus, mask, mode, cancel, delay, out)?;
    }

    if let Some((offset, value)) = plan.nvram_write {
        bus.nvram().write_byte(offset, value)?;
    }
    if let Some(mac) = plan.set_mac {
        info!("setting MAC address to {}", mac);
        bus.nvram().write_mac(mac)?;
    }
    if plan.show_mac {
        let mac = bus.nvram().read_mac()?;
        report::write_mac(out, mac)?;
    }

    if plan.dump_nvram {
        out.write_all(&bus.nvram().read_block()?)?;
    }
    if plan.dump_otp {
        out.write_all(&bus.otp().read_identity()?)?;
    }

    if let Some(deciseconds) = plan.sleep {
        writeln!(out, "Sleeping for {} deciseconds...", deciseconds)?;
        out.flush()?;
        bus.watchdog().sleep_for(deciseconds);
    }

    out.flush()?;
    Ok(())
}

fn sample<B, D, W>(
    bus: &mut RegisterBus<B>,
    mask: ChannelMask,
    mode: SampleMode,
    cancel: &AtomicBool,
    delay: D,
    out: &mut W,
) -> Result<(), CtlError>
where
    B: I2cBus,
    D: DelayNs,
    W: Write,
{
    let mut counter: u32 = 0;
    let mut sampler = bus.sampler(mask, mode, cancel, delay);
    for batch in sampler.by_ref() {
        for reading in &batch.readings {
            match report::write_reading(out, counter, reading).and_then(|()| out.flush()) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("output closed, stopping sampling");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
            counter = counter.wrapping_add(1);
        }
    }
    debug!(
        "sampling stopped after {} passes, {} readings",
        sampler.passes(),
        counter
    );
    Ok(())
}
