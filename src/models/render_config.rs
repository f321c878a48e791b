// src/models/render_config.rs
//
// The validated parameter set a WaveRenderer runs with

use nannou::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::utilities::color::parse_palette;

pub const DEFAULT_WAVE_COLORS: [&str; 5] = ["#38bdf8", "#818cf8", "#c084fc", "#e879f9", "#22d3ee"];
pub const DEFAULT_WAVE_COUNT: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderConfigError {
    #[error("at least one wave color is required")]
    NoColors,

    #[error("wave opacity must be within [0, 1], got {0}")]
    OpacityOutOfRange(f32),

    #[error("wave width must be a non-negative number, got {0}")]
    InvalidWaveWidth(f32),

    #[error("blur radius must be a non-negative number, got {0}")]
    InvalidBlur(f32),

    #[error("unknown speed class '{0}', expected 'slow' or 'fast'")]
    UnknownSpeed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedClass {
    Slow,
    #[default]
    Fast,
}

impl SpeedClass {
    /// Time offset added per frame.
    pub fn increment(self) -> f64 {
        match self {
            SpeedClass::Slow => 0.001,
            SpeedClass::Fast => 0.002,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SpeedClass::Slow => SpeedClass::Fast,
            SpeedClass::Fast => SpeedClass::Slow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpeedClass::Slow => "slow",
            SpeedClass::Fast => "fast",
        }
    }
}

impl FromStr for SpeedClass {
    type Err = RenderConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(SpeedClass::Slow),
            "fast" => Ok(SpeedClass::Fast),
            _ => Err(RenderConfigError::UnknownSpeed(s.to_string())),
        }
    }
}

impl fmt::Display for SpeedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub colors: Vec<Rgb>,
    pub background_fill: Rgb,
    pub wave_opacity: f32,
    pub wave_width: f32,
    pub blur: f32,
    pub speed: SpeedClass,
    pub wave_count: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colors: parse_palette(&DEFAULT_WAVE_COLORS[..]).unwrap_or_default(),
            background_fill: rgb(0.0, 0.0, 0.0),
            wave_opacity: 0.5,
            wave_width: 50.0,
            blur: 10.0,
            speed: SpeedClass::Fast,
            wave_count: DEFAULT_WAVE_COUNT,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderConfigError> {
        if self.colors.is_empty() {
            return Err(RenderConfigError::NoColors);
        }
        if !(0.0..=1.0).contains(&self.wave_opacity) {
            return Err(RenderConfigError::OpacityOutOfRange(self.wave_opacity));
        }
        if !self.wave_width.is_finite() || self.wave_width < 0.0 {
            return Err(RenderConfigError::InvalidWaveWidth(self.wave_width));
        }
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(RenderConfigError::InvalidBlur(self.blur));
        }
        Ok(())
    }

    /// Stroke color of wave `index`. A palette shorter than the wave count wraps.
    pub fn stroke_color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// The renderer captures colors, fill and opacity when a chain starts,
    /// so a change to any of them needs a fresh chain.
    pub fn requires_restart(&self, next: &RenderConfig) -> bool {
        self.colors != next.colors
            || self.background_fill != next.background_fill
            || self.wave_opacity != next.wave_opacity
    }

    pub fn with_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_background_fill(mut self, fill: Rgb) -> Self {
        self.background_fill = fill;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.wave_opacity = opacity;
        self
    }

    pub fn with_speed(mut self, speed: SpeedClass) -> Self {
        self.speed = speed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_increments() {
        assert_eq!(SpeedClass::Slow.increment(), 0.001);
        assert_eq!(SpeedClass::Fast.increment(), 0.002);
        assert!(SpeedClass::Slow.increment() > 0.0);
    }

    #[test]
    fn test_speed_parsing() {
        assert_eq!("slow".parse::<SpeedClass>(), Ok(SpeedClass::Slow));
        assert_eq!(" FAST ".parse::<SpeedClass>(), Ok(SpeedClass::Fast));
        assert_eq!(
            "medium".parse::<SpeedClass>(),
            Err(RenderConfigError::UnknownSpeed("medium".to_string()))
        );
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.colors.len(), 5);
        assert_eq!(config.wave_count, 5);
        assert_eq!(config.speed, SpeedClass::Fast);
    }

    #[test]
    fn test_validation_errors() {
        let config = RenderConfig::default().with_colors(Vec::new());
        assert_eq!(config.validate(), Err(RenderConfigError::NoColors));

        let config = RenderConfig::default().with_opacity(1.5);
        assert_eq!(
            config.validate(),
            Err(RenderConfigError::OpacityOutOfRange(1.5))
        );

        let config = RenderConfig {
            blur: -1.0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Err(RenderConfigError::InvalidBlur(-1.0)));
    }

    #[test]
    fn test_short_palette_wraps() {
        let red = rgb(1.0, 0.0, 0.0);
        let blue = rgb(0.0, 0.0, 1.0);
        let config = RenderConfig::default().with_colors(vec![red, blue]);

        assert_eq!(config.stroke_color(0), red);
        assert_eq!(config.stroke_color(1), blue);
        assert_eq!(config.stroke_color(2), red);
        assert_eq!(config.stroke_color(4), red);
        assert_eq!(config.stroke_color(0), config.stroke_color(config.colors.len()));
    }

    #[test]
    fn test_requires_restart() {
        let base = RenderConfig::default();

        assert!(!base.requires_restart(&base.clone()));
        assert!(base.requires_restart(&base.clone().with_opacity(0.4)));
        assert!(base.requires_restart(&base.clone().with_background_fill(rgb(1.0, 1.0, 1.0))));
        assert!(base.requires_restart(&base.clone().with_colors(vec![rgb(1.0, 0.0, 0.0)])));

        // speed and width are read live
        assert!(!base.requires_restart(&base.clone().with_speed(SpeedClass::Slow)));
        let wider = RenderConfig {
            wave_width: 80.0,
            ..base.clone()
        };
        assert!(!base.requires_restart(&wider));
    }
}
