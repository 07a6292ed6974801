use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use viewinject_compiler::options::ProcessorOptions;

/// Configuration file looked up next to the crate's `Cargo.toml`.
pub const CONFIG_FILE: &str = "viewinject.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("unable to read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load `viewinject.toml` from `manifest_dir`. A missing file means
/// defaults; an unreadable or malformed one is an error.
pub fn load_config(manifest_dir: &Path) -> Result<ProcessorOptions, ConfigError> {
    let path = manifest_dir.join(CONFIG_FILE);

    match fs::read_to_string(&path) {
        Ok(text) => parse_config(&text).map_err(|source| ConfigError::Parse { path, source }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(ProcessorOptions::default())
        }
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}

pub fn parse_config(text: &str) -> Result<ProcessorOptions, toml::de::Error> {
    toml::from_str(text)
}

///
/// TESTS
///
