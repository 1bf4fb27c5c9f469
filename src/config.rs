//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file (`--config <FILE>`, else `config.toml` in the platform
//!    config directory when it exists)
//! 3. `DUPFIND_*` environment variables (e.g. `DUPFIND_ALGORITHM=sha256`)
//! 4. Command-line flags, applied by the caller via [`Config::apply_cli`]
//!
//! An unsupported algorithm name in any layer fails the load, so a bad
//! configuration is reported before any directory is walked.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::duplicates::FinderConfig;
use crate::scanner::{HashAlgorithm, WalkerConfig, DEFAULT_BUFFER_SIZE};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPFIND_";

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The requested digest is not one of the supported algorithms.
    #[error("Unsupported hash algorithm '{0}' (expected one of: md5, sha256, blake3)")]
    UnsupportedAlgorithm(String),

    /// The read chunk size must be at least one byte.
    #[error("Invalid buffer size {0}: must be at least 1 byte")]
    InvalidBufferSize(usize),

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),

    /// The configuration sources could not be read or merged.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest used to fingerprint files.
    pub algorithm: HashAlgorithm,
    /// Read chunk size in bytes.
    pub buffer_size: usize,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// Skip dot-prefixed files and directories.
    pub skip_hidden: bool,
    /// Visit siblings in name order.
    pub sort_entries: bool,
    /// Abort the scan on the first unreadable file.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            follow_symlinks: false,
            skip_hidden: false,
            sort_entries: false,
            strict: false,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// `explicit_path` must exist when given; the default location is only
    /// used if a file is actually there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `explicit_path` does not exist,
    /// [`ConfigError::Load`] for unreadable or malformed sources
    /// (including unsupported algorithm names) and
    /// [`ConfigError::InvalidBufferSize`] for a zero chunk size.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match explicit_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::MissingFile(path.to_path_buf()));
                }
                log::debug!("Loading config from {}", path.display());
                figment = figment.merge(Toml::file_exact(path));
            }
            None => {
                if let Some(path) = Self::default_path().filter(|p| p.exists()) {
                    log::debug!("Loading config from {}", path.display());
                    figment = figment.merge(Toml::file_exact(path));
                }
            }
        }

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Extract and validate a config from an assembled figment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBufferSize`] if `buffer_size` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize(self.buffer_size));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded layers.
    ///
    /// Boolean flags can only switch a setting on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBufferSize`] for `--buffer-size 0`.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(algorithm) = cli.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(buffer_size) = cli.buffer_size {
            self.buffer_size = buffer_size;
        }
        self.follow_symlinks |= cli.follow_symlinks;
        self.skip_hidden |= cli.skip_hidden;
        self.sort_entries |= cli.sort;
        self.strict |= cli.strict;
        self.validate()
    }

    /// Build the finder configuration for a scan.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig {
            walker_config: WalkerConfig::new(
                self.follow_symlinks,
                self.skip_hidden,
                self.sort_entries,
            ),
            algorithm: self.algorithm,
            buffer_size: self.buffer_size,
            strict: self.strict,
            progress_callback: None,
        }
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupfind").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
