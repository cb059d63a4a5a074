//! Optional TOML configuration file merged with command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_chase_core::GameConfig;
use serde::Deserialize;

/// Contents of a configuration file. Every table and key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
    /// Session settings consumed by the bootstrap.
    pub game: GameConfig,
    /// Window settings consumed by the rendering backend.
    pub display: DisplayConfig,
}

/// Window presentation settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    pub vsync: bool,
    pub show_fps: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            show_fps: false,
        }
    }
}

impl ConfigFile {
    /// Reads and parses the file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
