// src/config/config_load.rs
//
// Loading config.toml and turning it into renderer settings

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::config_types::*;
use crate::models::{RenderConfig, RenderConfigError, Theme, ThemePalette, ThemeSet};
use crate::utilities::color::{parse_color, parse_palette, ColorError};

const CONFIG_FILE: &str = "config.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color in {theme} theme: {source}")]
    Color { theme: Theme, source: ColorError },

    #[error("invalid wave settings: {0}")]
    Invalid(#[from] RenderConfigError),
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub wave: WaveConfig,
    pub theme: ThemeConfig,
    pub osc: OscConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_path(Path::new(CONFIG_FILE))
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let config_path = exe_path.parent()?.join(CONFIG_FILE);

        if !config_path.exists() {
            return None;
        }
        match Self::load_from_path(&config_path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("ignoring {}: {}", config_path.display(), e);
                None
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both themes produce a usable RenderConfig.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for theme in [Theme::Light, Theme::Dark] {
            self.render_config(theme)?;
        }
        Ok(())
    }

    pub fn theme_set(&self) -> Result<ThemeSet, ConfigError> {
        Ok(ThemeSet {
            light: palette(Theme::Light, &self.theme.light)?,
            dark: palette(Theme::Dark, &self.theme.dark)?,
        })
    }

    pub fn render_config(&self, theme: Theme) -> Result<RenderConfig, ConfigError> {
        let palette_config = match theme {
            Theme::Light => &self.theme.light,
            Theme::Dark => &self.theme.dark,
        };
        let palette = palette(theme, palette_config)?;
        let config = RenderConfig {
            colors: palette.colors,
            background_fill: palette.background_fill,
            wave_opacity: self.wave.wave_opacity,
            wave_width: self.wave.wave_width,
            blur: self.wave.blur,
            speed: self.wave.speed,
            wave_count: self.wave.wave_count,
        };
        config.validate()?;
        Ok(config)
    }
}

fn palette(theme: Theme, config: &PaletteConfig) -> Result<ThemePalette, ConfigError> {
    let colors =
        parse_palette(&config.colors[..]).map_err(|source| ConfigError::Color { theme, source })?;
    let background_fill =
        parse_color(&config.background_fill).map_err(|source| ConfigError::Color { theme, source })?;
    Ok(ThemePalette {
        colors,
        background_fill,
    })
}
