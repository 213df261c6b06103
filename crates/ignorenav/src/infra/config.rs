//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::infra::fs::default_case_sensitivity;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".ignorenav/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub output: Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(default = "Resolution::default_separator")]
    pub separator: String,
    #[serde(default)]
    pub case_sensitivity: CaseSensitivity,
}

impl Resolution {
    fn default_separator() -> String {
        "/".into()
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            separator: Self::default_separator(),
            case_sensitivity: CaseSensitivity::default(),
        }
    }
}

/// How to decide case sensitivity for lookups and matching.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum CaseSensitivity {
    /// Follow the host platform's default.
    #[default]
    Auto,
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// Resolve the mode to a concrete flag.
    pub fn resolve(self) -> bool {
        match self {
            CaseSensitivity::Auto => default_case_sensitivity(),
            CaseSensitivity::Sensitive => true,
            CaseSensitivity::Insensitive => false,
        }
    }
}

impl FromStr for CaseSensitivity {
    type Err = UnknownCaseSensitivity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(CaseSensitivity::Auto),
            "sensitive" => Ok(CaseSensitivity::Sensitive),
            "insensitive" => Ok(CaseSensitivity::Insensitive),
            other => Err(UnknownCaseSensitivity(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown case sensitivity mode: {0}")]
pub struct UnknownCaseSensitivity(String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default = "Output::default_format")]
    pub format: String,
    #[serde(default)]
    pub absolute_paths: bool,
}

impl Output {
    fn default_format() -> String {
        "plain".into()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            absolute_paths: false,
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    format: Option<String>,
    case: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            format: env::var("IGNORENAV_FORMAT").ok(),
            case: env::var("IGNORENAV_CASE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(format: &str, case: &str) -> Self {
        Self {
            format: Some(format.to_owned()),
            case: Some(case.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace
    /// config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            resolution: merge_resolution(self.resolution, other.resolution),
            output: merge_output(self.output, other.output),
        }
    }
}

fn merge_resolution(base: Resolution, overlay: Resolution) -> Resolution {
    Resolution {
        separator: if overlay.separator != Resolution::default_separator() {
            overlay.separator
        } else {
            base.separator
        },
        case_sensitivity: if overlay.case_sensitivity != CaseSensitivity::default() {
            overlay.case_sensitivity
        } else {
            base.case_sensitivity
        },
    }
}

fn merge_output(base: Output, overlay: Output) -> Output {
    Output {
        format: if overlay.format != Output::default_format() {
            overlay.format
        } else {
            base.format
        },
        absolute_paths: overlay.absolute_paths || base.absolute_paths,
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("ignorenav/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(format) = env.format {
        config.output.format = format;
    }
    if let Some(case) = env.case {
        match case.parse::<CaseSensitivity>() {
            Ok(mode) => config.resolution.case_sensitivity = mode,
            Err(err) => tracing::warn!(error = %err, "ignoring IGNORENAV_CASE"),
        }
    }
    config
}
