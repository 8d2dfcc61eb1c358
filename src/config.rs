use crate::input::{Key, KeyBindings};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("unknown key for {field}: {name}")]
    UnknownKey { field: &'static str, name: String },
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Cells per side
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Pixel width of the square drawing surface
    #[serde(default = "default_width")]
    pub width: u32,
}

#[derive(Debug, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_start_search_key")]
    pub start_search_key: String,
    #[serde(default = "default_reset_key")]
    pub reset_key: String,
    #[serde(default = "default_quit_key")]
    pub quit_key: String,
    #[serde(default = "default_copy_grid_key")]
    pub copy_grid_key: String,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_show_grid_lines")]
    pub show_grid_lines: bool,
    /// Search iterations advanced per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> usize { 50 }
fn default_width() -> u32 { 800 }
fn default_start_search_key() -> String { "Space".to_string() }
fn default_reset_key() -> String { "C".to_string() }
fn default_quit_key() -> String { "Escape".to_string() }
fn default_copy_grid_key() -> String { "P".to_string() }
fn default_window_title() -> String { "A* Path Finding Algorithm".to_string() }
fn default_show_grid_lines() -> bool { true }
fn default_steps_per_frame() -> usize { 1 }
fn default_log_level() -> String { "info".to_string() }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            width: default_width(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            start_search_key: default_start_search_key(),
            reset_key: default_reset_key(),
            quit_key: default_quit_key(),
            copy_grid_key: default_copy_grid_key(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            show_grid_lines: default_show_grid_lines(),
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            controls: ControlsConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            info!("No config.toml found, using default configuration");
            return Config::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded configuration from config.toml");
                config
            }
            Err(e) => {
                warn!("Failed to load config.toml: {}", e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.rows == 0 {
            return Err(ConfigError::Invalid {
                field: "grid.rows",
                reason: "must be at least 1".to_string(),
            });
        }
        if (self.grid.width as usize) < self.grid.rows {
            return Err(ConfigError::Invalid {
                field: "grid.width",
                reason: format!("{} pixels cannot fit {} rows", self.grid.width, self.grid.rows),
            });
        }
        if self.visual.steps_per_frame == 0 {
            return Err(ConfigError::Invalid {
                field: "visual.steps_per_frame",
                reason: "must be at least 1".to_string(),
            });
        }
        self.key_bindings()?;
        Ok(())
    }

    /// Parse the configured key names
    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        let parse = |field: &'static str, name: &str| {
            name.parse::<Key>().map_err(|_| ConfigError::UnknownKey {
                field,
                name: name.to_string(),
            })
        };

        Ok(KeyBindings {
            start_search: parse("controls.start_search_key", &self.controls.start_search_key)?,
            reset: parse("controls.reset_key", &self.controls.reset_key)?,
            quit: parse("controls.quit_key", &self.controls.quit_key)?,
            copy_grid: parse("controls.copy_grid_key", &self.controls.copy_grid_key)?,
        })
    }
}
