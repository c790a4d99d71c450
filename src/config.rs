//! Runtime settings for the terminal front-end, read from TOML.
//!
//! ```toml
//! [display]
//! fps = 60
//! cell_width = 8.0
//! cell_height = 16.0
//! glyph_sprites = true
//!
//! [audio]
//! enabled = true
//! bell = false
//!
//! [paths]
//! log_file = "neon_shooter.log"
//! high_score_file = "~/.neon_shooter_score"
//! ```
//!
//! Every key is optional; missing ones take the defaults below.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "NEON_SHOOTER_CONFIG";
/// Looked up in the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "neon_shooter.toml";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    pub paths: PathsConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Simulation steps per second.
    pub fps: u32,
    /// World pixels covered by one terminal column.
    pub cell_width: f32,
    /// World pixels covered by one terminal row.
    pub cell_height: f32,
    /// Draw sprites as glyph art; off falls back to outline shapes.
    pub glyph_sprites: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { fps: 60, cell_width: 8.0, cell_height: 16.0, glyph_sprites: true }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Ring the terminal bell on explosions.
    pub bell: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig { enabled: true, bell: false }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where `RUST_LOG` output goes; stderr shares the screen with the game.
    pub log_file: PathBuf,
    /// Best score across runs.  A leading `~` expands to `$HOME`.
    pub high_score_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            log_file: PathBuf::from("neon_shooter.log"),
            high_score_file: PathBuf::from("~/.neon_shooter_score"),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// `$NEON_SHOOTER_CONFIG` if set (must exist), else `neon_shooter.toml`
    /// if present, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from_file(Path::new(&path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::load_from_file(fallback);
        }
        debug!("no config file, using defaults");
        Ok(Self::default())
    }

    pub fn high_score_path(&self) -> PathBuf {
        expand_home(&self.paths.high_score_file)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(rest)
        }
        Err(_) => path.to_path_buf(),
    }
}
