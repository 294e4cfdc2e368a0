//! Watchdog and sleep control
//!
//! Every operation is an unconditional command sequence; nothing about the
//! current watchdog state is read back or cached. Within a sequence each
//! write is attempted even if an earlier one failed, so a failed disable
//! does not stop the reload and arm writes of a sleep request.

use heapless::Vec;

use compctl_core::watchdog::{
    reload_payload, WatchdogState, CMD_ENABLE, CMD_SLEEP, DISABLE_PAYLOAD, FEED_RELOAD,
    FEED_RELOAD_DECISECONDS,
};
use compctl_core::Error;
use compctl_hal::I2cBus;
use compctl_protocol::regmap::{WDT_COMMAND, WDT_RELOAD};
use log::{debug, info, warn};

use crate::bus::RegisterBus;

/// Longest command sequence (sleep: disable, reload, arm)
const MAX_STEPS: usize = 3;

/// Individual register write within a watchdog sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogStep {
    /// Reload/countdown register write
    Reload,
    /// Arm command
    Enable,
    /// Disarm command
    Disable,
    /// Power-down countdown command
    SleepArm,
}

/// Outcome of a watchdog command sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogReport {
    /// State the sequence commanded
    pub commanded: WatchdogState,
    steps: Vec<(WatchdogStep, Result<(), Error>), MAX_STEPS>,
}

impl WatchdogReport {
    fn new(commanded: WatchdogState) -> Self {
        Self {
            commanded,
            steps: Vec::new(),
        }
    }

    /// Each attempted step in order with its result
    pub fn steps(&self) -> &[(WatchdogStep, Result<(), Error>)] {
        &self.steps
    }

    /// Check whether every step was acknowledged
    pub fn is_ok(&self) -> bool {
        self.steps.iter().all(|(_, r)| r.is_ok())
    }

    /// Steps that failed
    pub fn failures(&self) -> impl Iterator<Item = &(WatchdogStep, Result<(), Error>)> {
        self.steps.iter().filter(|(_, r)| r.is_err())
    }

    fn record(&mut self, step: WatchdogStep, result: Result<(), Error>) {
        // Sequences are at most MAX_STEPS long
        let _ = self.steps.push((step, result));
    }

    fn extend(&mut self, other: WatchdogReport) {
        for (step, result) in other.steps {
            self.record(step, result);
        }
    }
}

/// Watchdog command sequences
pub struct WatchdogController<'a, B> {
    bus: &'a mut RegisterBus<B>,
}

impl<'a, B: I2cBus> WatchdogController<'a, B> {
    /// Borrow `bus` for watchdog commands
    pub fn new(bus: &'a mut RegisterBus<B>) -> Self {
        Self { bus }
    }

    /// Reload the watchdog and arm it
    ///
    /// The reload is always the fixed 800-decisecond value; `timeout_seconds`
    /// does not change what is written. A failed reload write is only
    /// logged at debug level.
    pub fn feed(&mut self, timeout_seconds: u32) -> WatchdogReport {
        debug!(
            "feeding watchdog (requested {}s, writing fixed {} deciseconds)",
            timeout_seconds, FEED_RELOAD_DECISECONDS
        );
        let mut report = WatchdogReport::new(WatchdogState::Armed(Some(FEED_RELOAD_DECISECONDS)));

        let result = self.bus.write(WDT_RELOAD, &FEED_RELOAD);
        if let Err(e) = &result {
            debug!("watchdog reload write failed: {}", e);
        }
        report.record(WatchdogStep::Reload, result);

        report.extend(self.enable());
        report
    }

    /// Arm the watchdog with whatever reload it holds
    pub fn enable(&mut self) -> WatchdogReport {
        let mut report = WatchdogReport::new(WatchdogState::Armed(None));
        let result = self.command(WatchdogStep::Enable, &[CMD_ENABLE]);
        report.record(WatchdogStep::Enable, result);
        report
    }

    /// Disarm the watchdog
    pub fn disable(&mut self) -> WatchdogReport {
        let mut report = WatchdogReport::new(WatchdogState::Disabled);
        let result = self.command(WatchdogStep::Disable, &DISABLE_PAYLOAD);
        report.record(WatchdogStep::Disable, result);
        report
    }

    /// Power the board down for `deciseconds`
    ///
    /// Disarms the watchdog first, then programs the countdown and arms it.
    /// The caller validates the range (see
    /// [`compctl_core::watchdog::sleep_deciseconds`]).
    pub fn sleep_for(&mut self, deciseconds: u32) -> WatchdogReport {
        info!("sleeping for {} deciseconds", deciseconds);
        let mut report = WatchdogReport::new(WatchdogState::SleepArmed(deciseconds));

        report.extend(self.disable());

        let result = self.bus.write(WDT_RELOAD, &reload_payload(deciseconds));
        if let Err(e) = &result {
            warn!("sleep countdown write failed: {}", e);
        }
        report.record(WatchdogStep::Reload, result);

        let result = self.command(WatchdogStep::SleepArm, &[CMD_SLEEP]);
        report.record(WatchdogStep::SleepArm, result);

        report
    }

    fn command(&mut self, step: WatchdogStep, payload: &[u8]) -> Result<(), Error> {
        let result = self.bus.write(WDT_COMMAND, payload);
        if let Err(e) = &result {
            warn!("watchdog {:?} command failed: {}", step, e);
        }
        result
    }
}
