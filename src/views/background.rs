// src/views/background.rs
//
// Hosts a WaveRenderer: owns the frame scheduler, tracks the active theme
// and decides whether a settings change needs a restart or can be applied
// to the running chain.

use nannou::prelude::*;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::models::{RenderConfig, SpeedClass, Theme, ThemeSet};
use crate::render::{FrameScheduler, Surface, WaveRenderer};
use crate::utilities::noise::NoiseField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    Unchanged,
    Updated,   // applied to the running chain
    Restarted, // new chain, time reset to zero
    Stored,    // not running, kept for the next start
    Rejected,
}

pub struct WaveBackground<S: Surface> {
    renderer: WaveRenderer<S>,
    scheduler: FrameScheduler,
    themes: ThemeSet,
    theme: Theme,
    current: RenderConfig,
    mounted: bool,
    paused: bool,
}

impl<S: Surface> WaveBackground<S> {
    pub fn new(noise: NoiseField, themes: ThemeSet, theme: Theme, base: RenderConfig) -> Self {
        let palette = themes.palette(theme);
        let current = base
            .with_colors(palette.colors.clone())
            .with_background_fill(palette.background_fill);
        Self {
            renderer: WaveRenderer::new(noise),
            scheduler: FrameScheduler::new(),
            themes,
            theme,
            current,
            mounted: false,
            paused: false,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let theme = config.theme.initial;
        let base = config.render_config(theme)?;
        let themes = config.theme_set()?;
        let noise = match config.wave.seed {
            Some(seed) => NoiseField::new(seed),
            None => NoiseField::from_entropy(),
        };
        debug!(seed = noise.seed(), %theme, "wave background created");
        Ok(Self::new(noise, themes, theme, base))
    }

    /// Attaches the surface and starts animating. False when the surface
    /// cannot draw, in which case the background stays blank.
    pub fn mount(&mut self, surface: S) -> bool {
        self.mounted = true;
        self.paused = false;
        let started = self
            .renderer
            .start(surface, self.current.clone(), &mut self.scheduler);
        if !started {
            info!("wave background disabled: surface cannot draw");
        }
        started
    }

    pub fn unmount(&mut self) {
        self.renderer.stop(&mut self.scheduler);
        self.mounted = false;
    }

    pub fn pause(&mut self) {
        self.renderer.stop(&mut self.scheduler);
        self.paused = true;
    }

    /// Starts a fresh chain after `pause`.
    pub fn resume(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.paused = false;
        self.renderer
            .restart(self.current.clone(), &mut self.scheduler)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.renderer.resize(width, height);
    }

    /// Dispatches the frames due this display refresh. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let mut ran = 0;
        for handle in self.scheduler.take_due() {
            if self.renderer.on_frame(handle, &mut self.scheduler) {
                ran += 1;
            }
        }
        ran
    }

    pub fn apply_config(&mut self, next: RenderConfig) -> ConfigChange {
        if next == self.current {
            return ConfigChange::Unchanged;
        }
        if let Err(e) = next.validate() {
            debug!("rejected wave settings: {}", e);
            return ConfigChange::Rejected;
        }

        let restart = self.current.requires_restart(&next);
        self.current = next;

        if !self.mounted || self.paused {
            return ConfigChange::Stored;
        }
        if restart {
            self.renderer
                .restart(self.current.clone(), &mut self.scheduler);
            ConfigChange::Restarted
        } else {
            self.renderer.update_config(self.current.clone());
            ConfigChange::Updated
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> ConfigChange {
        self.theme = theme;
        let palette = self.themes.palette(theme);
        let next = self
            .current
            .clone()
            .with_colors(palette.colors.clone())
            .with_background_fill(palette.background_fill);
        let change = self.apply_config(next);
        info!(%theme, ?change, "theme set");
        change
    }

    pub fn toggle_theme(&mut self) -> ConfigChange {
        self.set_theme(self.theme.toggle())
    }

    pub fn set_speed(&mut self, speed: SpeedClass) -> ConfigChange {
        self.apply_config(self.current.clone().with_speed(speed))
    }

    pub fn toggle_speed(&mut self) -> ConfigChange {
        self.set_speed(self.current.speed.toggle())
    }

    pub fn set_opacity(&mut self, opacity: f32) -> ConfigChange {
        self.apply_config(self.current.clone().with_opacity(opacity))
    }

    pub fn set_background_fill(&mut self, fill: Rgb) -> ConfigChange {
        self.apply_config(self.current.clone().with_background_fill(fill))
    }

    pub fn set_colors(&mut self, colors: Vec<Rgb>) -> ConfigChange {
        self.apply_config(self.current.clone().with_colors(colors))
    }

    pub fn set_wave_width(&mut self, width: f32) -> ConfigChange {
        self.apply_config(RenderConfig {
            wave_width: width,
            ..self.current.clone()
        })
    }

    pub fn set_blur(&mut self, blur: f32) -> ConfigChange {
        self.apply_config(RenderConfig {
            blur,
            ..self.current.clone()
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &RenderConfig {
        &self.current
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.renderer.is_running()
    }

    pub fn renderer(&self) -> &WaveRenderer<S> {
        &self.renderer
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.renderer.surface_mut()
    }
}
