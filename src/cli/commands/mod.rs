pub mod completions;
pub mod init;
pub mod sync;
pub mod switch;

use crate::aws_config::{default_config_path, ConfigFile};
use crate::error::Result;
use std::path::PathBuf;

/// Load the shared config file from the CLI-supplied path or the default.
pub(crate) fn load_config(path: Option<PathBuf>) -> Result<ConfigFile> {
    let path = match path {
        Some(p) => p,
        None => default_config_path()?,
    };
    ConfigFile::load(path)
}
