use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Missing --{long} (-{short}) value")]
    #[diagnostic(
        code(gomake::missing_value),
        help("pass a value after the flag or attach it with `=`")
    )]
    MissingValue { short: String, long: String },

    #[error("Cannot set log level (input: {input:?})")]
    #[diagnostic(
        code(gomake::invalid_log_level),
        help("expected one of off, error, warn, info, debug, trace")
    )]
    InvalidLogLevel { input: String },

    #[error("Cannot read config file {path:?}")]
    #[diagnostic(code(gomake::config))]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to run script {path:?}")]
    #[diagnostic(code(gomake::exec))]
    Exec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
