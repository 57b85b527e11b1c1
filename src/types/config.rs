use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// User configuration (~/.config/reposort/config.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default target base directory for sorted repositories
    #[serde(default)]
    pub target: Option<PathBuf>,

    /// Disable fsck checks when cloning (for repos with malformed objects)
    #[serde(default)]
    pub no_fsck: bool,
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Config = serde_yml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yml::to_string(self).context("failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Default config file location: $XDG_CONFIG_HOME/reposort/config.yaml,
    /// falling back to ~/.config/reposort/config.yaml
    pub fn default_path() -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(config_dir.join("reposort").join("config.yaml"))
    }

    /// Load the user config, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_default() -> Self {
        Self::default_path()
            .filter(|p| p.exists())
            .and_then(|p| Self::load(&p).ok())
            .unwrap_or_default()
    }
}
