use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use tokio::fs;

use crate::error::Error;

pub const CONFIG_FILE_NAME: &str = "gomake.toml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scripts: Scripts,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scripts {
    /// folder with the command scripts, relative to the work path
    pub directory: PathBuf,

    /// file name prefix that marks a script as a command
    pub prefix: String,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("scripts"),
            prefix: String::from("command-"),
        }
    }
}

/// Reads the config from the work path. A missing file yields the defaults.
#[tracing::instrument(level = "trace")]
pub async fn read_config(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE_NAME);

    let cfg_string = match fs::read_to_string(&path).await {
        Ok(cfg_string) => cfg_string,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No config at {path:?}, using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading config file {path:?}"));
        }
    };

    toml::from_str(&cfg_string).map_err(|source| Error::Config { path, source }.into())
}
