pub mod render_config;
pub mod theme;

pub use render_config::{
    RenderConfig, RenderConfigError, SpeedClass, DEFAULT_WAVE_COLORS, DEFAULT_WAVE_COUNT,
};
pub use theme::{Theme, ThemeError, ThemePalette, ThemeSet};
