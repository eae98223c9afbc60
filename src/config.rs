//! Editor configuration persistence
//!
//! Stores editor-wide defaults in `~/.config/scribe/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::registry::EditableSettings;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Element tag new blocks are created with (Enter)
    #[serde(default = "default_block_node")]
    pub default_block_node: String,

    /// Whether native selection-change notifications flow through the
    /// pipeline. Off by default; most hosts deliver them too noisily to
    /// treat like real input.
    #[serde(default)]
    pub route_selection_changes: bool,

    /// Whether editables handle embedded non-editable widgets
    #[serde(default = "default_allow_block_widgets")]
    pub allow_block_widgets: bool,
}

fn default_block_node() -> String {
    "div".to_string()
}

fn default_allow_block_widgets() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_block_node: default_block_node(),
            route_selection_changes: false,
            allow_block_widgets: default_allow_block_widgets(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Per-editable settings derived from the editor-wide defaults
    pub fn editable_settings(&self) -> EditableSettings {
        EditableSettings {
            default_block_node: self.default_block_node.clone(),
            allow_block_widgets: self.allow_block_widgets,
        }
    }
}
