//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Local config: `<dir>/.famtree.toml` (usually the working directory)
//! 4. Environment variables: `FAMTREE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How the tree is printed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Two spaces per level
    #[default]
    Indent,
    /// Box-drawing tree
    Ascii,
}

/// The pair of names queried by a default run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    pub first: String,
    pub second: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            first: "Bilbo".into(),
            second: "Frodo".into(),
        }
    }
}

/// Raw query config for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQueryConfig {
    pub first: Option<String>,
    pub second: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub style: Option<RenderStyle>,
    pub query: RawQueryConfig,
}

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory searched for tree files (default: ./data)
    pub data_dir: PathBuf,
    /// Extension of tree files, without the dot (default: txt)
    pub extension: String,
    /// Default tree rendering
    pub style: RenderStyle,
    /// Names queried by `famtree run`
    pub query: QueryConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            extension: "txt".into(),
            style: RenderStyle::default(),
            query: QueryConfig::default(),
        }
    }
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".famtree.toml")
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

/// Style names from the environment match case-insensitively, like the CLI flag.
fn parse_env_style(val: &str) -> Result<RenderStyle, ApplicationError> {
    RenderStyle::from_str(val, true).map_err(|e| ApplicationError::Config {
        message: format!("FAMTREE_STYLE: {}", e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            extension: overlay
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            style: overlay.style.unwrap_or(self.style),
            query: QueryConfig {
                first: overlay
                    .query
                    .first
                    .clone()
                    .unwrap_or_else(|| self.query.first.clone()),
                second: overlay
                    .query
                    .second
                    .clone()
                    .unwrap_or_else(|| self.query.second.clone()),
            },
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the data directory.
    fn expand_paths(&mut self) {
        let raw = self.data_dir.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.data_dir = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.famtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FAMTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("extension") {
            settings.extension = val;
        }
        if let Ok(val) = config.get_string("style") {
            settings.style = parse_env_style(&val)?;
        }
        if let Ok(val) = config.get_string("query.first") {
            settings.query.first = val;
        }
        if let Ok(val) = config.get_string("query.second") {
            settings.query.second = val;
        }

        Ok(settings)
    }

    /// Directory to search for tree files: `data_dir` if present, else `.`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if self.data_dir.is_dir() {
            self.data_dir.clone()
        } else {
            PathBuf::from(".")
        }
    }

    /// Render settings as TOML for display.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
