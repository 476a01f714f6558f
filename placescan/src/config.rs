use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use common::constants::{CANVAS_WIDTH, DEFAULT_DATA_FILE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

const fn default_canvas_width() -> u32 {
    CANVAS_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            canvas_width: default_canvas_width(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 {
            return Err(ConfigError::Validation(
                "canvas_width must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
