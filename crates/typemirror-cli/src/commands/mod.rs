//! Subcommands.

pub mod check;
pub mod generate;

use std::path::Path;
use typemirror::{Config, ConfigError};

/// Load an explicit config file, or `typemirror.toml` from the working directory.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(".")),
    }
}
