//! `qlab` configuration: built-in defaults + optional TOML file.
//!
//! - `Config::default()` → built-in values
//! - `Config::from_toml_file(path)` → explicit file (must exist)
//! - `Config::load(cli_path)` → `--config` if given, else ~/.qlab/config.toml if present
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.qlab\config.toml on Windows; ~/.qlab/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".qlab").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Default shot count for `run` / `grover`.
    pub shots: usize,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Soft limit: the CLI warns above it, the engine itself never refuses.
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            max_qubits: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Decimal places when printing amplitudes and probabilities.
    pub precision: usize,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            color: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub simulator: SimulatorConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        toml::from_str(txt).context("parsing config TOML")
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&txt).with_context(|| format!("in {}", path.display()))
    }

    /// An explicit path must exist; the per-user default is optional.
    pub fn load(cli_path: &Option<PathBuf>) -> Result<Self> {
        let explicit = cli_path.is_some();
        match resolve_config_path(cli_path) {
            Some(p) if explicit || p.is_file() => Self::from_toml_file(&p),
            _ => Ok(Self::default()),
        }
    }
}
