// src/render/wave_renderer.rs
//
// The wave background: a translucent fill followed by a handful of
// noise-displaced horizontal strokes, repainted once per frame.
//
// A renderer owns at most one frame chain. Every frame schedules the next
// one and remembers its handle, and stop/restart cancel that handle before
// anything else happens. A frame whose handle is not the current one is
// ignored, so a stale callback can never draw.

use nannou::prelude::*;
use tracing::{debug, trace, warn};

use super::scheduler::{FrameHandle, FrameScheduler};
use super::surface::{DrawContext, Surface};
use crate::models::RenderConfig;
use crate::utilities::noise::NoiseField;

/// Horizontal distance between sampled points, in pixels.
pub const SAMPLE_STEP: f32 = 5.0;
/// Horizontal scale of the noise field.
pub const NOISE_X_SCALE: f64 = 800.0;
/// Noise-space distance between neighbouring waves.
pub const WAVE_SPACING: f64 = 0.3;
/// Vertical displacement in pixels for a noise value of 1.
pub const WAVE_AMPLITUDE: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    time: f64,
    increment: f64,
    frame: Option<FrameHandle>,
    frames_drawn: u64,
}

impl AnimationState {
    fn new(increment: f64) -> Self {
        Self {
            time: 0.0,
            increment,
            frame: None,
            frames_drawn: 0,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> Option<FrameHandle> {
        self.frame
    }
}

pub struct WaveRenderer<S: Surface> {
    surface: Option<S>,
    noise: NoiseField,
    config: Option<RenderConfig>,
    state: Option<AnimationState>,
    width: f32,
    height: f32,
    path: Vec<Point2>,
}

impl<S: Surface> WaveRenderer<S> {
    pub fn new(noise: NoiseField) -> Self {
        Self {
            surface: None,
            noise,
            config: None,
            state: None,
            width: 0.0,
            height: 0.0,
            path: Vec::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(NoiseField::new(seed))
    }

    /// Begins animating `surface`. Returns false, leaving nothing scheduled,
    /// when the surface has no 2D context. An invalid config is refused
    /// before the running chain is touched.
    pub fn start(&mut self, surface: S, config: RenderConfig, scheduler: &mut FrameScheduler) -> bool {
        if let Err(e) = config.validate() {
            warn!("refusing to start wave animation: {}", e);
            return false;
        }
        self.stop(scheduler);
        self.surface = Some(surface);
        self.begin(config, scheduler)
    }

    /// Cancels the running chain and begins a new one at time zero.
    pub fn restart(&mut self, config: RenderConfig, scheduler: &mut FrameScheduler) -> bool {
        if let Err(e) = config.validate() {
            warn!("refusing to restart wave animation: {}", e);
            return false;
        }
        self.stop(scheduler);
        self.begin(config, scheduler)
    }

    /// Cancels the pending frame. Nothing in this chain draws afterwards.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(state) = self.state.take() {
            if let Some(handle) = state.frame {
                scheduler.cancel_frame(handle);
            }
            debug!(
                time = state.time,
                frames = state.frames_drawn,
                "wave animation stopped"
            );
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let blur = self.config.as_ref().map(|c| c.blur);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_size(self.width, self.height);
            // resizing may reset the context's filter state
            if let (Some(ctx), Some(blur)) = (surface.context_2d(), blur) {
                ctx.set_filter_blur(blur);
            }
        }
        trace!(width = self.width, height = self.height, "wave surface resized");
    }

    /// Swaps in settings that are read every frame (width, blur, speed,
    /// wave count) without resetting the time offset. Colors, fill and
    /// opacity belong to the chain, so a change to them is refused and
    /// false returned; those go through `restart`.
    pub fn update_config(&mut self, config: RenderConfig) -> bool {
        if let Err(e) = config.validate() {
            warn!("ignoring invalid wave config: {}", e);
            return false;
        }
        if self.config.as_ref().is_some_and(|c| c.requires_restart(&config)) {
            warn!("colors, fill or opacity changed, wave config needs a restart");
            return false;
        }
        if let Some(state) = self.state.as_mut() {
            state.increment = config.speed.increment();
        }
        let blur_changed = self.config.as_ref().map(|c| c.blur) != Some(config.blur);
        if blur_changed {
            if let Some(ctx) = self.surface.as_mut().and_then(|s| s.context_2d()) {
                ctx.set_filter_blur(config.blur);
            }
        }
        self.config = Some(config);
        true
    }

    /// Runs one frame of the chain. Returns true if the frame belonged to
    /// this renderer's current chain and the chain continues.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut FrameScheduler) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if state.frame != Some(handle) {
            trace!(frame = handle.id(), "ignoring stale frame");
            return false;
        }
        state.frame = None;

        let Some(config) = self.config.as_ref() else {
            self.state = None;
            return false;
        };
        let Some(ctx) = self.surface.as_mut().and_then(|s| s.context_2d()) else {
            debug!("wave surface detached, ending animation");
            self.state = None;
            return false;
        };

        state.time += state.increment;
        if self.width > 0.0 && self.height > 0.0 {
            draw_frame(
                ctx,
                config,
                &self.noise,
                state.time,
                self.width,
                self.height,
                &mut self.path,
            );
        }
        state.frames_drawn += 1;
        state.frame = Some(scheduler.request_frame());
        true
    }

    pub fn is_running(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.frame.is_some())
    }

    pub fn time(&self) -> f64 {
        self.state.as_ref().map_or(0.0, |s| s.time)
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.state.as_ref().and_then(|s| s.frame)
    }

    pub fn state(&self) -> Option<&AnimationState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> Option<&RenderConfig> {
        self.config.as_ref()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Wave `index` sampled at time `t` for the current width and height.
    pub fn wave_points(&self, index: usize, t: f64) -> Vec<Point2> {
        let mut points = Vec::new();
        sample_wave(&self.noise, index, t, self.width, self.height, &mut points);
        points
    }

    fn begin(&mut self, config: RenderConfig, scheduler: &mut FrameScheduler) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let (width, height) = surface.size();
        let Some(ctx) = surface.context_2d() else {
            debug!("surface has no 2D context, wave background disabled");
            return false;
        };
        ctx.set_filter_blur(config.blur);

        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let mut state = AnimationState::new(config.speed.increment());
        state.frame = Some(scheduler.request_frame());
        debug!(
            speed = %config.speed,
            waves = config.wave_count,
            width = self.width,
            height = self.height,
            "wave animation started"
        );
        self.state = Some(state);
        self.config = Some(config);
        true
    }
}

fn draw_frame<C: DrawContext>(
    ctx: &mut C,
    config: &RenderConfig,
    noise: &NoiseField,
    t: f64,
    width: f32,
    height: f32,
    path: &mut Vec<Point2>,
) {
    // translucent fill leaves a fading trail of earlier frames
    ctx.set_global_alpha(config.wave_opacity);
    ctx.fill_rect(0.0, 0.0, width, height, config.background_fill);
    ctx.set_global_alpha(1.0);

    for i in 0..config.wave_count {
        sample_wave(noise, i, t, width, height, path);
        ctx.stroke_polyline(path, config.stroke_color(i), config.wave_width);
    }
}

fn sample_wave(
    noise: &NoiseField,
    index: usize,
    t: f64,
    width: f32,
    height: f32,
    points: &mut Vec<Point2>,
) {
    points.clear();
    let mid = height * 0.5;
    let mut x = 0.0f32;
    while x < width {
        let n = noise.sample(x as f64 / NOISE_X_SCALE, WAVE_SPACING * index as f64, t);
        points.push(pt2(x, n as f32 * WAVE_AMPLITUDE + mid));
        x += SAMPLE_STEP;
    }
}
