//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default notes root
    pub root: Option<PathBuf>,

    /// Column widths for the `ls` table
    pub table: TableWidths,
}

/// Column widths of the human-readable note table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableWidths {
    pub id_width: usize,
    pub title_width: usize,
    pub tags_width: usize,
}

impl Default for TableWidths {
    fn default() -> Self {
        Self {
            id_width: 24,
            title_width: 60,
            tags_width: 30,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `config_path`, or defaults if it doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notegit/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notegit")
            .join("config.toml")
    }

    /// Resolve the notes root, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--root` argument
    /// 2. Config file `root` setting
    /// 3. Current working directory
    pub fn notes_root(&self, cli_root: Option<&PathBuf>) -> PathBuf {
        cli_root
            .cloned()
            .or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
