use std::{ffi::OsString, path::Path, process::ExitStatus};

use tokio::process::Command;

use crate::error::Error;

/// Runs a script with inherited stdio and waits for it to finish.
/// Returns the exit code the script ended with.
#[tracing::instrument(level = "debug")]
pub async fn exec_script(path: &Path, args: &[OsString]) -> Result<i32, Error> {
    let status = Command::new(path)
        .args(args)
        .status()
        .await
        .map_err(|source| Error::Exec {
            path: path.to_owned(),
            source,
        })?;
    tracing::debug!("Script exited with {status}");

    Ok(exit_code(status))
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
