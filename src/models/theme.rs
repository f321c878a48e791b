// src/models/theme.rs
//
// Light/dark palettes for the wave background

use nannou::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme '{0}', expected 'light' or 'dark'")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ThemeError::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub colors: Vec<Rgb>,
    pub background_fill: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSet {
    pub light: ThemePalette,
    pub dark: ThemePalette,
}

impl ThemeSet {
    pub fn palette(&self, theme: Theme) -> &ThemePalette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(
            "sepia".parse::<Theme>(),
            Err(ThemeError::UnknownTheme("sepia".to_string()))
        );
    }

    #[test]
    fn test_palette_lookup() {
        let set = ThemeSet {
            light: ThemePalette {
                colors: vec![rgb(1.0, 0.9, 0.8)],
                background_fill: rgb(1.0, 1.0, 1.0),
            },
            dark: ThemePalette {
                colors: vec![rgb(0.3, 0.2, 0.1)],
                background_fill: rgb(0.0, 0.0, 0.0),
            },
        };
        assert_eq!(set.palette(Theme::Dark).background_fill, rgb(0.0, 0.0, 0.0));
        assert_eq!(set.palette(Theme::Light).colors.len(), 1);
    }
}
