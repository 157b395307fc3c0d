/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::Parser;
use log::LevelFilter;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ElevatorError;

/***************************************/
/*             Constants               */
/***************************************/
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub web: WebConfig,
    pub elevator: ElevatorConfig,
    pub logging: LogConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub client_port: u16,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WebConfig {
    pub enabled: bool,
    pub web_port: u16,
}

/**
 * Physical constants of the simulated elevator.
 *
 * # Fields
 * - `n_floors`:        Number of floors, at least 2.
 * - `speed`:           Travel speed in floors per second.
 * - `margin`:          Distance from a floor (in floors) within which the floor sensor triggers.
 * - `update_period`:   Period of the physics tick, in milliseconds.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub n_floors: u8,
    pub speed: f64,
    pub margin: f64,
    pub update_period: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub log_level: String,
    pub shh: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, io::Error),
    Parse(PathBuf, toml::de::Error),
}

/// Command line flags. Every flag overrides the matching value from the config file.
#[derive(Parser, Debug, Default)]
#[clap(name = "elevator-simulator", version, about = "Simulated elevator for the real-time programming lab")]
pub struct CliArgs {
    /// Configuration file, defaults to ./config.toml when present
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Port used by elevator clients
    #[clap(short = 'c', long)]
    pub client_port: Option<u16>,

    /// Port used by the web frontend
    #[clap(short = 'w', long)]
    pub web_port: Option<u16>,

    /// Do not start the web frontend
    #[clap(long)]
    pub no_web: bool,

    /// Number of floors
    #[clap(short = 'f', long)]
    pub floors: Option<u8>,

    /// The minimum log level which will show
    #[clap(short = 'l', long)]
    pub log_level: Option<String>,

    /// Silence the friendly welcome message
    #[clap(long)]
    pub shh: bool,

    /// Velocity of the elevator, in floors per second
    #[clap(short = 's', long)]
    pub speed: Option<f64>,

    /// Distance from a floor within which the floor sensor detects the elevator
    #[clap(short = 'm', long)]
    pub margin: Option<f64>,

    /// Update period of the elevator, in milliseconds
    #[clap(short = 'p', long)]
    pub update_period: Option<u64>,
}

/***************************************/
/*              Defaults               */
/***************************************/
impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { client_port: 15657 }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            enabled: true,
            web_port: 3001,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            n_floors: 4,
            speed: 0.4,
            margin: 0.05,
            update_period: 5,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_level: "INFO".to_string(),
            shh: false,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/// Loads the configuration file. Without an explicit path a missing
/// `config.toml` falls back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_str = fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
    toml::from_str(&config_str).map_err(|e| ConfigError::Parse(path, e))
}

impl Config {
    pub fn validate(&self) -> Result<(), ElevatorError> {
        self.elevator.validate()?;
        parse_log_level(&self.logging.log_level)?;
        Ok(())
    }
}

impl ElevatorConfig {
    pub fn validate(&self) -> Result<(), ElevatorError> {
        if self.n_floors < 2 {
            return Err(ElevatorError::InvalidArgument(format!(
                "the elevator needs at least 2 floors, got {}",
                self.n_floors
            )));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ElevatorError::InvalidArgument(format!(
                "speed must be a non-negative number, got {}",
                self.speed
            )));
        }
        if !self.margin.is_finite() || self.margin <= 0.0 {
            return Err(ElevatorError::InvalidArgument(format!(
                "margin must be a positive number, got {}",
                self.margin
            )));
        }
        if self.update_period == 0 {
            return Err(ElevatorError::InvalidArgument(
                "update period must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.update_period)
    }
}

impl CliArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(port) = self.client_port {
            config.server.client_port = port;
        }
        if let Some(port) = self.web_port {
            config.web.web_port = port;
        }
        if self.no_web {
            config.web.enabled = false;
        }
        if let Some(floors) = self.floors {
            config.elevator.n_floors = floors;
        }
        if let Some(level) = &self.log_level {
            config.logging.log_level = level.clone();
        }
        if self.shh {
            config.logging.shh = true;
        }
        if let Some(speed) = self.speed {
            config.elevator.speed = speed;
        }
        if let Some(margin) = self.margin {
            config.elevator.margin = margin;
        }
        if let Some(period) = self.update_period {
            config.elevator.update_period = period;
        }
        config
    }
}

/// Parses a log level name. Accepts the `log` crate names as well as
/// `notice`, `warning` and `critical`.
pub fn parse_log_level(level: &str) -> Result<LevelFilter, ElevatorError> {
    match level.to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "critical" | "error" => Ok(LevelFilter::Error),
        "warning" | "warn" => Ok(LevelFilter::Warn),
        "notice" | "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(ElevatorError::InvalidArgument(format!(
            "unknown log level '{}'",
            level
        ))),
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, e) => {
                write!(f, "failed to read configuration file {}: {}", path.display(), e)
            }
            ConfigError::Parse(path, e) => {
                write!(f, "failed to parse configuration file {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
