use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::error;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

use u401_usb::error::ParseError;
use u401_usb::request::SwitchRequest;
use u401_usb::u401::U401;

use crate::cli::{Cli, LevelFilter};

mod cli;

fn main() -> ExitCode {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(usage_exit_code(error.kind()));
        }
    };

    let logger = CombinedLogger::init(vec![TermLogger::new(
        match args.log_level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        },
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    if let Err(error) = logger {
        eprintln!("Could not configure the logger: {}", error);
    }

    if args.outputs.is_empty() {
        let _ = Cli::command().print_help();
        return ExitCode::from(1);
    }

    match run(&args) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            error!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// An explicit help request counts as a usage failure, the same as running
/// with no arguments at all.
fn usage_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Returns Ok(true) when every argument was applied, Ok(false) when some
/// arguments were skipped with their errors already reported.
fn run(args: &Cli) -> Result<bool> {
    // Parse everything up front: a malformed argument must abort the run
    // before any frame reaches the device.
    let mut requests = Vec::with_capacity(args.outputs.len());
    let mut clean = true;
    for raw in &args.outputs {
        match SwitchRequest::parse(raw) {
            Ok(request) => requests.push(request),
            Err(error @ ParseError::InvalidState(_)) => {
                // A bad on/off value skips just this argument; the run
                // continues but the invocation still fails overall.
                error!("{} in {}", error, raw);
                clean = false;
            }
            Err(error) => bail!("Unable to parse {}: {}", raw, error),
        }
    }

    let mut device = U401::open()?;
    device.configure_outputs();
    device.run_and_close(&requests)?;

    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_flags_exit_with_usage_failure() {
        for flag in ["-h", "--help"] {
            let error = Cli::try_parse_from(["u401ctl", flag]).unwrap_err();
            assert_eq!(usage_exit_code(error.kind()), 1);
        }
    }

    #[test]
    fn version_request_is_not_a_failure() {
        let error = Cli::try_parse_from(["u401ctl", "--version"]).unwrap_err();
        assert_eq!(usage_exit_code(error.kind()), 0);
    }
}
