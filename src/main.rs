// src/main.rs
use nannou::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use wavyback::{
    config::Config,
    controllers::{OscCommand, OscController, OscSender},
    render::CommandSurface,
    views::WaveBackground,
};

const TEXTURE_SAMPLES: u32 = 4;
const OPACITY_STEP: f32 = 0.1;

struct Model {
    // Core components:
    background: WaveBackground<CommandSurface>,

    // Comms components:
    osc_controller: Option<OscController>,
    osc_sender: Option<OscSender>,

    // Rendering components:
    target: RenderTarget,
    draw: nannou::Draw,

    // FPS
    last_update: Instant,
    fps: f32,
    debug_flag: bool,
}

// The offscreen texture the waves accumulate in. It is never cleared, so
// each frame's translucent fill leaves a fading trail of the previous ones.
struct RenderTarget {
    texture: wgpu::Texture,
    draw_renderer: nannou::draw::Renderer,
    texture_reshaper: wgpu::TextureReshaper,
    scale_factor: f32,
}

fn main() {
    init_tracing();
    nannou::app(model).update(update).run();
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["wavyback=info", "wgpu=warn", "naga=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    fmt().with_env_filter(filter).with_target(true).init();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().unwrap_or_else(|e| {
        warn!("using default config: {}", e);
        Config::default()
    });

    // OSC is optional; without it keyboard controls apply directly
    let osc_controller = OscController::new(config.osc.rx_port)
        .map_err(|e| error!("OSC control disabled: {}", e))
        .ok();
    let osc_sender = osc_controller
        .as_ref()
        .and_then(|_| OscSender::new(config.osc.rx_port).ok());

    // Create window
    let window_id = app
        .new_window()
        .title("wavyback")
        .size(config.window.width, config.window.height)
        .msaa_samples(1)
        .view(view)
        .key_pressed(key_pressed)
        .resized(resized)
        .build()
        .expect("failed to build window");
    let window = app.window(window_id).expect("window was just created");

    let target = build_render_target(&window);
    let rect = window.rect();

    let mut background =
        WaveBackground::from_config(&config).expect("config is validated when loaded");
    background.mount(CommandSurface::new(rect.w(), rect.h()));
    info!(
        theme = %background.theme(),
        speed = %background.config().speed,
        "wave background running"
    );

    Model {
        background,
        osc_controller,
        osc_sender,
        target,
        draw: nannou::Draw::new(),
        last_update: Instant::now(),
        fps: 0.0,
        debug_flag: false,
    }
}

fn build_render_target(window: &nannou::window::Window) -> RenderTarget {
    let device = window.device();
    let (width, height) = window.inner_size_pixels();
    let texture = wgpu::TextureBuilder::new()
        .size([width.max(1), height.max(1)])
        .usage(wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING)
        .sample_count(TEXTURE_SAMPLES)
        .format(wgpu::TextureFormat::Rgba16Float)
        .build(device);

    let draw_renderer = nannou::draw::RendererBuilder::new()
        .build_from_texture_descriptor(device, texture.descriptor());

    let texture_view = texture.view().build();
    let texture_reshaper = wgpu::TextureReshaper::new(
        device,
        &texture_view,
        texture.sample_count(),
        texture.sample_type(),
        window.msaa_samples(),
        Frame::TEXTURE_FORMAT,
    );

    RenderTarget {
        texture,
        draw_renderer,
        texture_reshaper,
        scale_factor: window.scale_factor(),
    }
}

fn resized(app: &App, model: &mut Model, size: Vec2) {
    let window = app.main_window();
    model.target = build_render_target(&window);
    model.background.resize(size.x, size.y);
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let config = model.background.config();
    let command = match key {
        Key::D => OscCommand::ToggleTheme,
        Key::S => OscCommand::SetSpeed {
            speed: config.speed.toggle(),
        },
        Key::Space => {
            if model.background.is_paused() {
                OscCommand::Start
            } else {
                OscCommand::Stop
            }
        }
        Key::Up => OscCommand::SetOpacity {
            opacity: (config.wave_opacity + OPACITY_STEP).min(1.0),
        },
        Key::Down => OscCommand::SetOpacity {
            opacity: (config.wave_opacity - OPACITY_STEP).max(0.0),
        },
        Key::P => {
            model.debug_flag = !model.debug_flag;
            return;
        }
        _ => return,
    };

    match &model.osc_sender {
        Some(sender) => sender.send_command(&command),
        None => apply_command(model, command),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    // FPS calculation
    if model.debug_flag {
        model.fps = frames_per_second(duration);
        app.main_window()
            .set_title(&format!("wavyback {:.1} fps", model.fps));
    }

    // Process OSC messages
    let commands = match model.osc_controller.as_mut() {
        Some(osc_controller) => {
            osc_controller.process_messages();
            osc_controller.take_commands()
        }
        None => Vec::new(),
    };
    for command in commands {
        apply_command(model, command);
    }

    if model.background.tick() == 0 {
        return;
    }
    if let Some(surface) = model.background.surface_mut() {
        surface.replay(&model.draw);
    }
    render_to_texture(app, model);
}

fn frames_per_second(frame_time: Duration) -> f32 {
    1.0 / frame_time.as_secs_f32().max(f32::EPSILON)
}

// Draw the state of Model into the given Frame
fn view(_app: &App, model: &Model, frame: Frame) {
    //resize texture to screen
    let mut encoder = frame.command_encoder();

    model
        .target
        .texture_reshaper
        .encode_render_pass(frame.texture_view(), &mut encoder);
}

fn render_to_texture(app: &App, model: &mut Model) {
    let window = app.main_window();
    let device = window.device();
    let ce_desc = wgpu::CommandEncoderDescriptor {
        label: Some("Wave renderer"),
    };
    let mut encoder = device.create_command_encoder(&ce_desc);
    let target = &mut model.target;
    let texture_view = target.texture.view().build();

    target.draw_renderer.encode_render_pass(
        device,
        &mut encoder,
        &model.draw,
        target.scale_factor,
        target.texture.size(),
        &texture_view,
        None,
    );

    window.queue().submit(Some(encoder.finish()));
    model.draw.reset();
}

fn apply_command(model: &mut Model, command: OscCommand) {
    let background = &mut model.background;
    let change = match command {
        OscCommand::SetTheme { theme } => background.set_theme(theme),
        OscCommand::ToggleTheme => background.toggle_theme(),
        OscCommand::SetSpeed { speed } => background.set_speed(speed),
        OscCommand::SetOpacity { opacity } => background.set_opacity(opacity),
        OscCommand::SetBackground { color } => background.set_background_fill(color),
        OscCommand::SetColors { colors } => background.set_colors(colors),
        OscCommand::SetWaveWidth { width } => background.set_wave_width(width),
        OscCommand::SetBlur { blur } => background.set_blur(blur),
        OscCommand::Start => {
            background.resume();
            return;
        }
        OscCommand::Stop => {
            background.pause();
            return;
        }
    };
    debug!(?change, "applied wave command");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_stays_finite_for_zero_frame_time() {
        assert!(frames_per_second(Duration::ZERO).is_finite());
        assert!((frames_per_second(Duration::from_millis(20)) - 50.0).abs() < 1e-3);
    }
}
