use std::{ffi::OsString, path::PathBuf};

use clap::{crate_version, value_parser, Arg, ArgMatches, Command};

use crate::{
    preparse::{DEFAULT_LOG_LEVEL, DEFAULT_WORK_PATH},
    scripts::DiscoveredCommand,
};

pub const BIN_NAME: &str = "gomake";
const FORWARDED_ARGS: &str = "args";

/// Builds the root command with one subcommand per discovered script.
/// `--log-level` and `--work-path` are only declared for the help output,
/// their values come from the pre-parser.
pub fn build_cli(commands: &[DiscoveredCommand]) -> Command {
    let root = Command::new(BIN_NAME)
        .version(crate_version!())
        .about("Runs the command scripts of a project")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("log-level")
                .short('L')
                .long("log-level")
                .value_name("LEVEL")
                .default_value(DEFAULT_LOG_LEVEL)
                .global(true)
                .help("Set log level"),
        )
        .arg(
            Arg::new("work-path")
                .short('W')
                .long("work-path")
                .value_name("PATH")
                .default_value(DEFAULT_WORK_PATH)
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Set the work path"),
        );

    commands
        .iter()
        .fold(root, |root, command| root.subcommand(script_command(command)))
}

fn script_command(command: &DiscoveredCommand) -> Command {
    Command::new(command.name.to_owned())
        .about(format!("Run command from {}", command.path.display()))
        .disable_help_flag(true)
        .arg(
            Arg::new(FORWARDED_ARGS)
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(OsString)),
        )
}

/// Returns the script selected by `matches` together with the arguments to
/// forward to it, or `None` when no subcommand was given.
pub fn selected_script<'a>(
    matches: &ArgMatches,
    commands: &'a [DiscoveredCommand],
) -> Option<(&'a DiscoveredCommand, Vec<OsString>)> {
    let (name, sub_matches) = matches.subcommand()?;
    let command = commands.iter().find(|c| c.name == name)?;
    let args = sub_matches
        .get_many::<OsString>(FORWARDED_ARGS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Some((command, args))
}
