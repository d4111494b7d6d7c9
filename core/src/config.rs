//! Configuration for the 8255 interpreter
//!
//! Settings are layered, later sources winning:
//! 1. Built-in defaults
//! 2. A TOML file: `LANG8255_CONFIG_PATH` if set, otherwise `8255.toml` in the
//!    working directory when present
//! 3. Environment variables, e.g. `LANG8255_INTERPRETER__DEBUG=true`
//!
//! A `.env` file is loaded before the environment is read.
//!
//! ```toml
//! [interpreter]
//! debug = false
//! ordered_comparisons = false
//!
//! [logging]
//! filter = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "LANG8255_CONFIG_PATH";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "LANG8255";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "8255.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub logging: LoggingConfig,
}

/// Settings the execution engine reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Pause before every instruction and show the debug view
    pub debug: bool,

    /// Let `cmp` produce greater/less flags and make jumps relational.
    /// Off by default: `cmp` then only distinguishes equal from not equal.
    pub ordered_comparisons: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for loading [`Config`] with explicit overrides
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    debug: bool,
    read_environment: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config_path: None,
            debug: false,
            read_environment: true,
        }
    }
}

impl ConfigBuilder {
    /// Config file to load (overrides the default search)
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Force debug mode on; `false` leaves the loaded setting alone
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Whether `.env`, `LANG8255_CONFIG_PATH` and `LANG8255_*` overrides apply
    pub fn read_environment(mut self, read: bool) -> Self {
        self.read_environment = read;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        use config::{Environment, File, FileFormat};

        if self.read_environment {
            dotenvy::dotenv().ok();
        }

        let path = self.config_path.or_else(|| {
            self.read_environment
                .then(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
                .flatten()
        });

        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

        builder = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingFile(path));
                }
                builder.add_source(File::from(path.as_path()).format(FileFormat::Toml))
            }
            None => builder.add_source(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
            ),
        };

        if self.read_environment {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let mut config: Config = builder.build()?.try_deserialize()?;
        if self.debug {
            config.interpreter.debug = true;
        }

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
