// src/config/config_types.rs
//
// Sections of config.toml. Every section falls back to its defaults when omitted.

use serde::Deserialize;

use crate::models::{SpeedClass, Theme, DEFAULT_WAVE_COUNT};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WaveConfig {
    pub wave_width: f32,
    pub blur: f32, // pixels
    pub speed: SpeedClass,
    pub wave_opacity: f32, // background fill alpha, 0.0-1.0
    pub wave_count: usize,
    pub seed: Option<u64>, // random when unset
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            wave_width: 50.0,
            blur: 15.0,
            speed: SpeedClass::Slow,
            wave_opacity: 0.4,
            wave_count: DEFAULT_WAVE_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub colors: Vec<String>,
    pub background_fill: String,
}

impl PaletteConfig {
    pub fn light() -> Self {
        Self {
            colors: to_strings(&["#FFE4DB", "#FFCFC2", "#FFB5A3", "#FF9A84", "#EDE0C0"]),
            background_fill: "#FFFDF7".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            colors: to_strings(&["#5D4026", "#6B4423", "#D98878", "#CA7060", "#4D3520"]),
            background_fill: "#2D1F14".to_string(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self::light()
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub initial: Theme,
    pub light: PaletteConfig,
    pub dark: PaletteConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            initial: Theme::Light,
            light: PaletteConfig::light(),
            dark: PaletteConfig::dark(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OscConfig {
    pub rx_port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self { rx_port: 9000 }
    }
}
