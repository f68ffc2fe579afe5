//! Scans the raw process arguments for the few options that have to be known
//! before clap runs. The work path decides which subcommands exist, so it can't
//! come out of the parser that needs those subcommands.

use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use tracing::level_filters::LevelFilter;

use crate::error::Error;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_WORK_PATH: &str = ".";

/// Options resolved from the raw arguments
#[derive(Clone, Debug)]
pub struct PreArgs {
    pub log_level: LevelFilter,
    pub work_path: PathBuf,
}

impl PreArgs {
    pub fn discover(args: &[OsString]) -> Result<Self, Error> {
        let log_level = discover_string_argument(args, "L", "log-level", DEFAULT_LOG_LEVEL)?;
        let log_level = parse_log_level(&log_level.to_string_lossy())?;
        let work_path = discover_string_argument(args, "W", "work-path", DEFAULT_WORK_PATH)?;

        Ok(Self {
            log_level,
            work_path: PathBuf::from(work_path),
        })
    }
}

/// Returns the value of the first `-<short> <value>`, `--<long> <value>` or
/// `--<long>=<value>` found in `args`. The first element is the program name
/// and is skipped. Nothing after `--` is inspected. Values are returned with
/// their raw bytes.
pub fn discover_string_argument(
    args: &[OsString],
    short: &str,
    long: &str,
    default: &str,
) -> Result<OsString, Error> {
    let short_flag = format!("-{short}");
    let long_flag = format!("--{long}");
    let attached = format!("{long_flag}=");

    let mut tokens = args.iter().skip(1);

    while let Some(token) = tokens.next() {
        if token == "--" {
            break;
        }
        if *token == *short_flag || *token == *long_flag {
            return tokens.next().cloned().ok_or_else(|| Error::MissingValue {
                short: short.to_owned(),
                long: long.to_owned(),
            });
        }
        if let Some(value) = strip_flag_prefix(token, &attached) {
            return Ok(value.to_owned());
        }
    }

    Ok(default.into())
}

#[cfg(unix)]
fn strip_flag_prefix<'a>(token: &'a OsStr, prefix: &str) -> Option<&'a OsStr> {
    use std::os::unix::ffi::OsStrExt;

    token
        .as_bytes()
        .strip_prefix(prefix.as_bytes())
        .map(OsStr::from_bytes)
}

#[cfg(not(unix))]
fn strip_flag_prefix<'a>(token: &'a OsStr, prefix: &str) -> Option<&'a OsStr> {
    token.to_str()?.strip_prefix(prefix).map(OsStr::new)
}

/// Parses a level name. Besides the names tracing knows, `warning`, `fatal`
/// and `panic` are accepted.
pub fn parse_log_level(input: &str) -> Result<LevelFilter, Error> {
    let invalid = || Error::InvalidLogLevel {
        input: input.to_owned(),
    };
    let normalized = input.trim().to_ascii_lowercase();
    let name = match normalized.as_str() {
        // tracing reads an empty string as `error`
        "" => return Err(invalid()),
        "warning" => "warn",
        "fatal" | "panic" => "error",
        other => other,
    };

    name.parse::<LevelFilter>().map_err(|_| invalid())
}
