//! Inspector configuration, stored as RON

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// What to do with a mesh after decoding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Merge coincident vertices before reporting
    #[serde(default = "default_true")]
    pub weld: bool,
    /// Scale into a unit bounding box before reporting
    #[serde(default)]
    pub normalize: bool,
    /// Include the full edge list in the report
    #[serde(default)]
    pub include_edges: bool,
    /// Pretty-print the JSON report
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            weld: true,
            normalize: false,
            include_edges: false,
            pretty: true,
        }
    }
}

impl InspectConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;
}

/// Loads, holds and saves the inspector configuration
pub struct ConfigManager {
    config: InspectConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Load from the OS-standard location, falling back to defaults
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Load from an explicit path, falling back to defaults
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let config = Self::load_from_path(&config_path).unwrap_or_else(|| {
            tracing::info!("No config file found, using defaults");
            InspectConfig::default()
        });

        Self {
            config,
            config_path,
            dirty: false,
        }
    }

    /// Get the OS-standard configuration file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stl-inspect")
            .join("config.ron")
    }

    fn load_from_path(path: &Path) -> Option<InspectConfig> {
        let content = std::fs::read_to_string(path).ok()?;
        match ron::from_str(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    }

    /// Get a reference to the current configuration
    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration (marks as dirty)
    pub fn config_mut(&mut self) -> &mut InspectConfig {
        self.dirty = true;
        &mut self.config
    }

    /// Mark the configuration as changed so the next save writes it
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the configuration has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the configuration to disk
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

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

    /// Reset configuration to defaults
    pub fn reset_to_defaults(&mut self) {
        self.config = InspectConfig::default();
        self.dirty = true;
    }

    /// Get the config file path
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
