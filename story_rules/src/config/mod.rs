//! Game configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::player::INITIAL_HEALTH;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "FOREST_STORY_CONFIG";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

/// Health deltas used when assembling the bundled story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTuning {
    /// Applied when the player eats the berries.
    pub berry_poison_delta: i32,
    /// Applied when the player fights the wolf.
    pub wolf_fight_delta: i32,
}

impl Default for ContentTuning {
    fn default() -> Self {
        Self {
            berry_poison_delta: -20,
            wolf_fight_delta: -30,
        }
    }
}

/// Top-level configuration for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub initial_health: i32,
    pub start_node: String,
    /// External story content. `None` plays the bundled story.
    pub story_file: Option<PathBuf>,
    pub tuning: ContentTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_health: INITIAL_HEALTH,
            start_node: "start".to_string(),
            story_file: None,
            tuning: ContentTuning::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], or defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        if path.is_none() {
            tracing::debug!("{} not set, using default config", CONFIG_ENV_VAR);
        }
        Self::load_or_default(path.as_deref())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_health <= 0 {
            return Err(ConfigError::Invalid {
                reason: format!("initial_health must be positive, got {}", self.initial_health),
            });
        }
        if self.start_node.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "start_node must not be empty".to_string(),
            });
        }
        let tuning = [
            ("berry_poison_delta", self.tuning.berry_poison_delta),
            ("wolf_fight_delta", self.tuning.wolf_fight_delta),
        ];
        for (name, delta) in tuning {
            if delta > 0 {
                return Err(ConfigError::Invalid {
                    reason: format!("tuning.{} must not be positive, got {}", name, delta),
                });
            }
        }
        Ok(())
    }
}
