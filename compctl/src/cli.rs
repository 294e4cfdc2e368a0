//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

/// Examine/modify state of the TS-7800-V2 companion controller
#[derive(Debug, Parser)]
#[command(name = "compctl")]
pub struct Cli {
    /// Put the board to sleep for SECONDS (1-524288); runs after every other action
    #[arg(short = 's', value_name = "SECONDS", value_parser = parse_number)]
    pub sleep: Option<u32>,

    /// Feed the watchdog and arm it
    #[arg(short = 'f')]
    pub feed: bool,

    /// Disable the watchdog
    #[arg(short = 'd')]
    pub disable: bool,

    /// Sample ADC channels CHANS and print raw values until interrupted, e.g. "0-2,4"
    #[arg(short = 'r', value_name = "CHANS", conflicts_with = "sample")]
    pub raw: Option<String>,

    /// Sample ADC channels CHANS and print millivolts until interrupted, e.g. "1,3,4"
    #[arg(short = 'S', value_name = "CHANS")]
    pub sample: Option<String>,

    /// Print board information
    #[arg(short = 'i')]
    pub info: bool,

    /// Dump the OTP identity block to stdout
    #[arg(short = 'o')]
    pub otp: bool,

    /// Dump the NVRAM block to stdout
    #[arg(short = 'm')]
    pub nvram: bool,

    /// NVRAM address to write (0-15), requires -D
    #[arg(short = 'A', value_name = "ADDR", value_parser = parse_number, requires = "data")]
    pub addr: Option<u32>,

    /// NVRAM data to write (0-255), requires -A
    #[arg(short = 'D', value_name = "DATA", value_parser = parse_number, requires = "addr")]
    pub data: Option<u32>,

    /// Display the MAC address, or set it when a value is given
    #[arg(
        short = 'M',
        value_name = "xx:xx:xx:xx:xx:xx",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub mac: Option<String>,

    /// Verbose logging
    #[arg(short = 'V')]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Parse an unsigned number with C-style base detection
///
/// `0x`/`0X` prefix selects hex, a leading `0` selects octal, anything
/// else is decimal.
pub fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        u32::from_str_radix(&s[1..], 8)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid number {:?}: {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_number_bases() {
        assert_eq!(parse_number("15"), Ok(15));
        assert_eq!(parse_number("0x0f"), Ok(15));
        assert_eq!(parse_number("0XFF"), Ok(255));
        assert_eq!(parse_number("017"), Ok(15));
        assert_eq!(parse_number("0"), Ok(0));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert!(parse_number("").is_err());
        assert!(parse_number("0x").is_err());
        assert!(parse_number("09").is_err());
        assert!(parse_number("-1").is_err());
        assert!(parse_number("12abc").is_err());
    }

    #[test]
    fn test_mac_flag_optional_value() {
        let cli = Cli::try_parse_from(["compctl", "-M"]).unwrap();
        assert_eq!(cli.mac.as_deref(), Some(""));

        let cli = Cli::try_parse_from(["compctl", "-M", "00:d0:69:01:02:03"]).unwrap();
        assert_eq!(cli.mac.as_deref(), Some("00:d0:69:01:02:03"));
    }

    #[test]
    fn test_nvram_write_needs_both() {
        assert!(Cli::try_parse_from(["compctl", "-A", "3"]).is_err());
        assert!(Cli::try_parse_from(["compctl", "-D", "3"]).is_err());

        let cli = Cli::try_parse_from(["compctl", "-A", "0x3", "-D", "0377"]).unwrap();
        assert_eq!((cli.addr, cli.data), (Some(3), Some(255)));
    }

    #[test]
    fn test_raw_and_millivolt_sampling_conflict() {
        assert!(Cli::try_parse_from(["compctl", "-r", "0", "-S", "1"]).is_err());
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["compctl", "-i"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(cli.info);
    }
}
