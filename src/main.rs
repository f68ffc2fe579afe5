use std::{ffi::OsString, process::ExitCode};

use config::read_config;
use context::Context;
use miette::{IntoDiagnostic, Result};
use preparse::PreArgs;
use scripts::{exec_script, ScriptLoader};
use tracing::level_filters::LevelFilter;

mod args;
mod config;
mod context;
mod error;
mod preparse;
mod scripts;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    let pre = PreArgs::discover(&raw_args)?;
    init_tracing(pre.log_level);

    let cfg = read_config(&pre.work_path).await?;
    let ctx = Context::new(&pre, cfg);
    tracing::debug!("Using work path {:?}", ctx.work_path);

    let commands = ScriptLoader::new(ctx.scripts_dir, ctx.prefix)
        .read_commands()
        .await;

    let mut cli = args::build_cli(&commands);
    let matches = cli
        .try_get_matches_from_mut(raw_args)
        .unwrap_or_else(|e| e.exit());

    match args::selected_script(&matches, &commands) {
        Some((command, forwarded)) => {
            tracing::debug!("Running {}", command.name);
            let code = exec_script(&command.path, &forwarded).await?;

            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
        None => {
            cli.print_help().into_diagnostic()?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(level: LevelFilter) {
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
