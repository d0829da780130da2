mod atomic;
mod config;

pub use config::{DEFAULT_CONFIG_FILE, KbConfig, load_or_default, save_config};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
