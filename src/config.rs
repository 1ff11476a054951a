//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hierarchy/hierarchy.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `HIERARCHY_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for the hierarchy CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree root label when a hierarchy has several first-level elements
    pub root_label: String,
    /// Colored terminal output
    pub color: bool,
    /// Separator between elements when printing branches and ancestor chains
    pub branch_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_label: ".".into(),
            color: true,
            branch_separator: " <- ".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_label: Option<String>,
    pub color: Option<bool>,
    pub branch_separator: Option<String>,
}

/// Get the XDG config directory for hierarchy.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hierarchy").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hierarchy.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            color: overlay.color.unwrap_or(self.color),
            branch_separator: overlay
                .branch_separator
                .clone()
                .unwrap_or_else(|| self.branch_separator.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let path = expand_path(path);
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 4. Apply environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply HIERARCHY_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("HIERARCHY").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("root_label") {
            settings.root_label = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }
        if let Ok(val) = config.get_string("branch_separator") {
            settings.branch_separator = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# hierarchy configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/hierarchy/hierarchy.toml
#   Explicit: --config <file>
#   Env:      HIERARCHY_* environment variables

# Label of the tree root when there are several first-level elements
# root_label = "."

# Colored output (NO_COLOR is honored as well)
# color = true

# Separator used by `branches` and `ancestors`
# branch_separator = " <- "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
