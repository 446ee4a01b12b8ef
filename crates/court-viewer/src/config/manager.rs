//! Configuration manager for loading, saving, and managing viewer configuration.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::AppConfig;

/// Configuration error types.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(String),
    /// Error during serialization.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Configuration manager handles loading, saving, and accessing viewer configuration.
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Create a new configuration manager, loading from the default location if available.
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create a configuration manager backed by `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let config_path = path.into();
        let config = Self::load_from_path(&config_path).unwrap_or_else(|| {
            tracing::info!("No config file found, using defaults");
            AppConfig::new()
        });

        Self {
            config,
            config_path,
            dirty: false,
        }
    }

    /// Get the OS-standard configuration directory.
    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("court-viewer")
    }

    /// Default configuration file path.
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("court.ron")
    }

    /// Load configuration from a file path.
    fn load_from_path(path: &Path) -> Option<AppConfig> {
        let content = std::fs::read_to_string(path).ok()?;
        match ron::from_str::<AppConfig>(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                if config.version != AppConfig::CURRENT_VERSION {
                    tracing::warn!(
                        found = config.version,
                        expected = AppConfig::CURRENT_VERSION,
                        "Config version mismatch, missing fields use defaults"
                    );
                }
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration (marks as dirty).
    pub fn config_mut(&mut self) -> &mut AppConfig {
        self.dirty = true;
        &mut self.config
    }

    /// Force the next save to write even without edits.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the configuration has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the configuration to disk.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        // Ensure config directory exists
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(&self.config_path, &content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", self.config_path);
        self.dirty = false;
        Ok(())
    }

    /// Reset configuration to defaults.
    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::new();
        self.dirty = true;
    }

    /// Get the config file path (for display purposes).
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Take the loaded configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
