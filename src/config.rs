//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/famtree/famtree.toml` (or an explicit path)
//! 3. Environment variables: `FAMTREE_*` prefix
//!
//! The CLI `--file` flag overrides `input_file` on top of all layers.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{LoadOptions, SelfLinkPolicy};

const ENV_PREFIX: &str = "FAMTREE";

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Family tree input file used when no `--file` is given
    pub input_file: Option<PathBuf>,
    /// Handling of members related to themselves
    pub self_links: SelfLinkPolicy,
    /// Line prefixes that mark comments in input files
    pub comment_prefixes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let options = LoadOptions::default();
        Self {
            input_file: None,
            self_links: options.self_links,
            comment_prefixes: options.comment_prefixes,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub input_file: Option<PathBuf>,
    pub self_links: Option<SelfLinkPolicy>,
    pub comment_prefixes: Option<Vec<String>>,
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_path` - Explicit config file; must exist when given. Without
    ///   it the global XDG file is used if present.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_path {
            Some(path) => {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        let raw = load_raw_settings(&global_path)?;
                        current = current.merge_with(&raw);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current, Self::environment())?;
        current.expand_paths();

        Ok(current)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            input_file: overlay
                .input_file
                .clone()
                .or_else(|| self.input_file.clone()),
            self_links: overlay.self_links.unwrap_or(self.self_links),
            comment_prefixes: overlay
                .comment_prefixes
                .clone()
                .unwrap_or_else(|| self.comment_prefixes.clone()),
        }
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    ///
    /// `FAMTREE_COMMENT_PREFIXES` is a comma separated list.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("input_file") {
            settings.input_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("self_links") {
            settings.self_links = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("{ENV_PREFIX}_SELF_LINKS: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("comment_prefixes") {
            settings.comment_prefixes = val
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.input_file {
            self.input_file = Some(PathBuf::from(expand_env_vars(&path.to_string_lossy())));
        }
    }

    /// Loader options derived from these settings.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            self_links: self.self_links,
            comment_prefixes: self.comment_prefixes.clone(),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# famtree configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/famtree/famtree.toml  (or --config <path>)
#   Env:  FAMTREE_* environment variables (explicit overrides)

# Family tree input file used when --file is not given
# input_file = "~/family/tree.txt"

# Members related to themselves: "reject" aborts the load, "skip" drops the link
# self_links = "reject"

# Line prefixes that mark comments
# comment_prefixes = ["#", "/"]
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
