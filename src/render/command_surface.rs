// src/render/command_surface.rs
//
// A Surface that records draw operations as DrawCommands.
// The nannou host replays them into a Draw once per frame; tests inspect them directly.

use nannou::prelude::*;

use super::surface::{DrawContext, Surface};

// Share of the stroke alpha given to the halo that stands in for the blur filter
const BLUR_HALO_ALPHA: f32 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Blur {
        radius: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
        alpha: f32,
    },
    Stroke {
        points: Vec<Point2>,
        color: Rgb,
        weight: f32,
        alpha: f32,
    },
}

#[derive(Debug)]
pub struct CommandSurface {
    width: f32,
    height: f32,
    alpha: f32,
    blur: f32,
    has_context: bool,
    attached: bool,
    commands: Vec<DrawCommand>,
    replay_blur: f32,
}

impl CommandSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            blur: 0.0,
            has_context: true,
            attached: true,
            commands: Vec::new(),
            replay_blur: 0.0,
        }
    }

    /// A surface that never yields a 2D context.
    pub fn without_context(width: f32, height: f32) -> Self {
        Self {
            has_context: false,
            ..Self::new(width, height)
        }
    }

    /// Simulates the host tearing the surface down.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn blur(&self) -> f32 {
        self.blur
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded fill and stroke operations.
    pub fn draw_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Blur { .. }))
            .count()
    }

    /// Converts a canvas-space point to nannou's centred, y-up space.
    pub fn to_nannou(&self, point: Point2) -> Point2 {
        pt2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    /// Drains the recorded commands into `draw`.
    pub fn replay(&mut self, draw: &Draw) {
        let commands = std::mem::take(&mut self.commands);
        for command in &commands {
            match command {
                DrawCommand::Blur { radius } => self.replay_blur = *radius,
                DrawCommand::FillRect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    alpha,
                } => {
                    let center = self.to_nannou(pt2(x + w / 2.0, y + h / 2.0));
                    draw.rect()
                        .x_y(center.x, center.y)
                        .w_h(*w, *h)
                        .color(rgba(color.red, color.green, color.blue, *alpha));
                }
                DrawCommand::Stroke {
                    points,
                    color,
                    weight,
                    alpha,
                } => {
                    let mapped: Vec<Point2> = points.iter().map(|p| self.to_nannou(*p)).collect();
                    if self.replay_blur > 0.0 {
                        let halo = rgba(
                            color.red,
                            color.green,
                            color.blue,
                            alpha * BLUR_HALO_ALPHA,
                        );
                        draw_segments(draw, &mapped, weight + self.replay_blur * 2.0, halo);
                    }
                    draw_segments(
                        draw,
                        &mapped,
                        *weight,
                        rgba(color.red, color.green, color.blue, *alpha),
                    );
                }
            }
        }
    }
}

fn draw_segments(draw: &Draw, points: &[Point2], weight: f32, color: Rgba) {
    for window in points.windows(2) {
        if let [p1, p2] = window {
            draw.line()
                .start(*p1)
                .end(*p2)
                .stroke_weight(weight)
                .color(color)
                .caps_round();
        }
    }
}

impl DrawContext for CommandSurface {
    fn set_filter_blur(&mut self, radius: f32) {
        self.blur = radius;
        self.commands.push(DrawCommand::Blur { radius });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color,
            alpha: self.alpha,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point2], color: Rgb, weight: f32) {
        if points.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            color,
            weight,
            alpha: self.alpha,
        });
    }
}

impl Surface for CommandSurface {
    type Context = Self;

    fn context_2d(&mut self) -> Option<&mut Self> {
        if self.has_context && self.attached {
            Some(self)
        } else {
            None
        }
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}
