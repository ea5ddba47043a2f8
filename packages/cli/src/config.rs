use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tagbuilder_editor::{RedoPolicy, SessionConfig, DEFAULT_MAX_LEVELS};

pub const DEFAULT_CONFIG_NAME: &str = "tagbuilder.config.json";

/// Tag builder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// "clear" drops redo states on a new edit, "retain" keeps them
    #[serde(default)]
    pub redo_policy: RedoPolicy,

    /// Name given to pages created by `init`
    #[serde(default = "default_page_name")]
    pub default_page_name: String,
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_LEVELS
}

fn default_page_name() -> String {
    "Home".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            history_limit: self.history_limit,
            redo_policy: self.redo_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            redo_policy: RedoPolicy::default(),
            default_page_name: default_page_name(),
        }
    }
}
