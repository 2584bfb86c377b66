//! spv-embed configuration
//!
//! Only the file named by `$SPV_EMBED_CONFIG` is read, so the generated
//! headers never depend on who runs the build. Without it the defaults apply.

use serde::{Deserialize, Serialize};
use spv_embed_core::{DEFAULT_COMPILER, DEFAULT_WORDS_PER_LINE};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "SPV_EMBED_CONFIG";

/// Compiler lookup section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompilerConfig {
    /// Executable name, looked up in `<sdk>/bin/` or on `PATH`
    pub name: String,
    /// Environment variable holding the SDK install root
    pub sdk_env: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPILER.to_string(),
            sdk_env: "VULKAN_SDK".to_string(),
        }
    }
}

/// Generated header section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Array values per row
    pub words_per_line: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load the file named by `$SPV_EMBED_CONFIG`, or the defaults when unset.
    ///
    /// A named file that cannot be read is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_file_path() else {
            log::debug!("{} not set, using defaults", CONFIG_PATH_ENV);
            return Ok(Self::default());
        };

        let config = Self::load_from(&path)?;
        log::info!("Applied configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Configuration file named by `$SPV_EMBED_CONFIG`
    pub fn config_file_path() -> Option<PathBuf> {
        non_empty_path(std::env::var_os(CONFIG_PATH_ENV))
    }

    /// Read the SDK root from the configured environment variable
    pub fn sdk_root(&self) -> Option<PathBuf> {
        non_empty_path(std::env::var_os(&self.compiler.sdk_env))
    }
}

fn non_empty_path(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read config file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse config file
    ParseError(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            ConfigError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
        }
    }
}

impl std::error::Error for ConfigError {}
