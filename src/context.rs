use std::path::PathBuf;

use crate::{config::Config, preparse::PreArgs};

/// Paths resolved during startup, handed to the later stages
#[derive(Clone, Debug)]
pub struct Context {
    pub work_path: PathBuf,
    pub scripts_dir: PathBuf,
    pub prefix: String,
}

impl Context {
    pub fn new(pre: &PreArgs, cfg: Config) -> Self {
        Self {
            work_path: pre.work_path.to_owned(),
            scripts_dir: pre.work_path.join(cfg.scripts.directory),
            prefix: cfg.scripts.prefix,
        }
    }
}
