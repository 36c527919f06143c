//! Terminal configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TerminalError};

/// Environment variable consulted for a config path when none is given.
pub const CONFIG_ENV_VAR: &str = "CMDTERM_CONFIG";

/// Runtime settings for an interpreter and its host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminalConfig {
    /// Enables debug-only commands (`TRACE`) and backtrace capture on errors.
    #[serde(default)]
    pub debug: bool,
    /// Maximum number of entries the command log retains.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Column width command names are padded to in `LS`.
    #[serde(default = "default_column_width")]
    pub column_width: usize,
    /// Prompt shown before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Whether the host echoes each input line into the log before running it.
    #[serde(default = "yes")]
    pub echo_input: bool,
}

fn default_buffer_size() -> usize {
    512
}
fn default_column_width() -> usize {
    16
}
fn default_prompt() -> String {
    ">".to_string()
}
fn yes() -> bool {
    true
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            debug: false,
            buffer_size: default_buffer_size(),
            column_width: default_column_width(),
            prompt: default_prompt(),
            echo_input: true,
        }
    }
}

impl TerminalConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded terminal config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config from an explicit path, then `CMDTERM_CONFIG`, then
    /// the built-in defaults.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        match path {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No terminal config given, using defaults");
                Ok(Self::default())
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(TerminalError::Config(
                "buffer_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
