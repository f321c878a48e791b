// src/render/mod.rs
// The wave renderer and the surfaces it draws on

pub mod command_surface;
pub mod scheduler;
pub mod surface;
pub mod wave_renderer;

pub use command_surface::{CommandSurface, DrawCommand};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use surface::{DrawContext, Surface};
pub use wave_renderer::{AnimationState, WaveRenderer};
