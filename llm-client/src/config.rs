use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{LlmError, Result};
use crate::provider::InferenceConfig;
use crate::registry::{ModelEntry, ModelRegistry};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// AWS region for the Bedrock runtime (None = ambient AWS configuration)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Models to compare, in call order (empty = built-in defaults)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelEntry>,

    /// Generation parameters shared by every call
    #[serde(default)]
    pub inference: InferenceConfig,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, returning defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home =
            std::env::var("HOME").map_err(|_| LlmError::ConfigError("HOME not set".into()))?;
        Ok(PathBuf::from(home).join(".config/cli-programs/converse.toml"))
    }

    /// The model registry this configuration selects
    pub fn registry(&self) -> ModelRegistry {
        if self.models.is_empty() {
            ModelRegistry::defaults()
        } else {
            ModelRegistry::from(self.models.clone())
        }
    }

    /// Add a model to the compared set, replacing an existing entry of the same name
    ///
    /// The first addition starts from the built-in defaults so they keep
    /// being compared.
    pub fn add_model(&mut self, name: &str, id: &str) -> Result<()> {
        if name.trim().is_empty() || id.trim().is_empty() {
            return Err(LlmError::ConfigError(
                "model name and identifier must not be empty".into(),
            ));
        }

        let mut registry = self.registry();
        registry.insert(name, id);
        self.models = registry.iter().cloned().collect();
        Ok(())
    }
}
