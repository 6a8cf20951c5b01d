//! Input configuration
//!
//! Stored in `~/.config/keyflow/config.yaml`:
//!
//! ```yaml
//! policy: aggregate        # or first_active
//! default_deadzone: 0.1
//! release_on_focus_loss: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Defaults, EvaluationPolicy};

/// Deadzone used by directional bindings that don't specify one
pub const DEFAULT_DEADZONE: f32 = 0.1;

/// Tuning for an [`Input`](crate::Input) instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// How actions combine multiple bindings; inherited by new profiles,
    /// maps and actions
    #[serde(default)]
    pub policy: EvaluationPolicy,

    /// Deadzone for `Action::add_vec2_default`, in `[0, 1)`
    #[serde(default = "default_deadzone")]
    pub default_deadzone: f32,

    /// Release every held key when the window loses focus
    #[serde(default = "default_true")]
    pub release_on_focus_loss: bool,
}

fn default_deadzone() -> f32 {
    DEFAULT_DEADZONE
}

fn default_true() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            policy: EvaluationPolicy::default(),
            default_deadzone: default_deadzone(),
            release_on_focus_loss: true,
        }
    }
}

impl InputConfig {
    /// Load config from the user config dir, or return defaults
    ///
    /// Missing or invalid files are logged and replaced with defaults.
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: InputConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.default_deadzone) {
            return Err(ConfigError::InvalidValue(format!(
                "default_deadzone must be in [0, 1), got {}",
                self.default_deadzone
            )));
        }
        Ok(())
    }

    /// Fall back to the default deadzone when the configured one is invalid
    pub(crate) fn sanitized(mut self) -> Self {
        if let Err(e) = self.validate() {
            tracing::warn!("{}, using {} instead", e, DEFAULT_DEADZONE);
            self.default_deadzone = DEFAULT_DEADZONE;
        }
        self
    }

    pub(crate) fn defaults(&self) -> Defaults {
        Defaults {
            policy: self.policy,
            deadzone: self.default_deadzone,
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidValue(e) => write!(f, "Invalid value: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
