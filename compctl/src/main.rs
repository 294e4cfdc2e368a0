//! compctl
//!
//! Examine and modify the companion controller of the TS-7800-V2: watchdog,
//! sleep, user ADC sampling, NVRAM, MAC address and OTP identity.

mod actions;
mod cli;
mod config;
mod error;
mod model;
mod report;

use std::io;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use compctl_core::channels::USAGE;
use compctl_drivers::RegisterBus;
use compctl_hal_linux::{Delay, LinuxI2cBus};
use log::{debug, error, info};
use signal_hook::consts::{SIGHUP, SIGINT, SIGPIPE, SIGTERM};

use crate::actions::Plan;
use crate::cli::Cli;
use crate::error::CtlError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if e.is_channel_format() {
                print!("{}", USAGE);
            }
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode, CtlError> {
    let cancel = install_cancel_flag()?;
    let config = config::load(&cli.config)?;

    let plan = Plan::from_cli(cli)?;
    if plan.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    }

    let model = if config.board.check_model {
        Some(model::identify(&config.board)?)
    } else {
        debug!("model check disabled");
        None
    };

    let device = LinuxI2cBus::open(&config.bus.to_linux()).map_err(|kind| CtlError::Open {
        device: config.bus.device.clone(),
        kind,
    })?;
    let mut bus = RegisterBus::new(device);
    info!("connected via {}", config.bus.device.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    actions::execute(&plan, &mut bus, model.as_deref(), &cancel, Delay, &mut out)?;

    Ok(ExitCode::SUCCESS)
}

/// Flag raised by INT, TERM, HUP and PIPE
fn install_cancel_flag() -> Result<Arc<AtomicBool>, CtlError> {
    let cancel = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM, SIGHUP, SIGPIPE] {
        signal_hook::flag::register(signal, Arc::clone(&cancel)).map_err(CtlError::Signal)?;
    }
    Ok(cancel)
}
