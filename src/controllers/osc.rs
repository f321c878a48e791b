// src/controllers/osc.rs
// OSC control of the wave background.
//
// Addresses:
//   /wave/theme <string "light"|"dark" | int 0|1>
//   /wave/toggletheme
//   /wave/speed <string "slow"|"fast">
//   /wave/opacity <float>
//   /wave/background <string color>
//   /wave/colors <string color>...
//   /wave/width <float>
//   /wave/blur <float>
//   /wave/start
//   /wave/stop

use nannou::prelude::*;
use nannou_osc as osc;
use tracing::{debug, warn};

use crate::models::{SpeedClass, Theme};
use crate::utilities::color::{parse_color, parse_palette, to_hex, ColorError};

#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    #[error("failed to open OSC socket: {0}")]
    Socket(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OscParseError {
    #[error("unknown OSC address pattern: {0}")]
    UnknownAddress(String),

    #[error("unexpected arguments for {0}")]
    BadArguments(String),

    #[error("invalid value for {addr}: {reason}")]
    InvalidValue { addr: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    SetTheme { theme: Theme },
    ToggleTheme,
    SetSpeed { speed: SpeedClass },
    SetOpacity { opacity: f32 },
    SetBackground { color: Rgb },
    SetColors { colors: Vec<Rgb> },
    SetWaveWidth { width: f32 },
    SetBlur { blur: f32 },
    Start,
    Stop,
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, ControllerError> {
        let receiver = osc::receiver(port)?;
        debug!(port, "listening for OSC");

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message.addr, &message.args[..]) {
                    Ok(command) => self.command_queue.push(command),
                    Err(e) => warn!("{}", e),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub fn parse_message(addr: &str, args: &[osc::Type]) -> Result<OscCommand, OscParseError> {
    let bad_args = || OscParseError::BadArguments(addr.to_string());
    let invalid = |reason: String| OscParseError::InvalidValue {
        addr: addr.to_string(),
        reason,
    };

    match addr {
        "/wave/theme" => match args {
            [osc::Type::String(name)] => {
                let theme = name
                    .parse::<Theme>()
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(OscCommand::SetTheme { theme })
            }
            [osc::Type::Int(dark)] => Ok(OscCommand::SetTheme {
                theme: if *dark != 0 { Theme::Dark } else { Theme::Light },
            }),
            _ => Err(bad_args()),
        },
        "/wave/toggletheme" => Ok(OscCommand::ToggleTheme),
        "/wave/speed" => match args {
            [osc::Type::String(name)] => {
                let speed = name
                    .parse::<SpeedClass>()
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(OscCommand::SetSpeed { speed })
            }
            _ => Err(bad_args()),
        },
        "/wave/opacity" => {
            let opacity = single_float(args).ok_or_else(bad_args)?;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid(format!("opacity {} outside [0, 1]", opacity)));
            }
            Ok(OscCommand::SetOpacity { opacity })
        }
        "/wave/background" => match args {
            [osc::Type::String(value)] => {
                let color = parse_color(value).map_err(|e| invalid(e.to_string()))?;
                Ok(OscCommand::SetBackground { color })
            }
            _ => Err(bad_args()),
        },
        "/wave/colors" => {
            let names = args
                .iter()
                .map(|arg| match arg {
                    osc::Type::String(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect::<Option<Vec<&str>>>()
                .ok_or_else(bad_args)?;
            if names.is_empty() {
                return Err(bad_args());
            }
            let colors = parse_palette(&names[..]).map_err(|e: ColorError| invalid(e.to_string()))?;
            Ok(OscCommand::SetColors { colors })
        }
        "/wave/width" => {
            let width = single_float(args).ok_or_else(bad_args)?;
            if width < 0.0 {
                return Err(invalid(format!("negative width {}", width)));
            }
            Ok(OscCommand::SetWaveWidth { width })
        }
        "/wave/blur" => {
            let blur = single_float(args).ok_or_else(bad_args)?;
            if blur < 0.0 {
                return Err(invalid(format!("negative blur {}", blur)));
            }
            Ok(OscCommand::SetBlur { blur })
        }
        "/wave/start" => Ok(OscCommand::Start),
        "/wave/stop" => Ok(OscCommand::Stop),
        _ => Err(OscParseError::UnknownAddress(addr.to_string())),
    }
}

fn single_float(args: &[osc::Type]) -> Option<f32> {
    let value = match args {
        [osc::Type::Float(v)] => Some(*v),
        [osc::Type::Double(v)] => Some(*v as f32),
        [osc::Type::Int(v)] => Some(*v as f32),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_port: u16) -> Result<Self, ControllerError> {
        let target_addr = "127.0.0.1".to_string();
        let sender = osc::sender()?;

        Ok(Self {
            sender,
            target_addr,
            target_port,
        })
    }

    pub fn send_command(&self, command: &OscCommand) {
        let (addr, args) = encode_command(command);
        if let Err(e) = self
            .sender
            .send((addr.clone(), args), (self.target_addr.as_str(), self.target_port))
        {
            debug!("failed to send {}: {:?}", addr, e);
        }
    }
}

/// The address and arguments `parse_message` turns back into `command`.
pub fn encode_command(command: &OscCommand) -> (String, Vec<osc::Type>) {
    let (addr, args) = match command {
        OscCommand::SetTheme { theme } => ("/wave/theme", vec![osc::Type::String(theme.to_string())]),
        OscCommand::ToggleTheme => ("/wave/toggletheme", Vec::new()),
        OscCommand::SetSpeed { speed } => ("/wave/speed", vec![osc::Type::String(speed.to_string())]),
        OscCommand::SetOpacity { opacity } => ("/wave/opacity", vec![osc::Type::Float(*opacity)]),
        OscCommand::SetBackground { color } => ("/wave/background", vec![osc::Type::String(to_hex(*color))]),
        OscCommand::SetColors { colors } => (
            "/wave/colors",
            colors.iter().map(|c| osc::Type::String(to_hex(*c))).collect(),
        ),
        OscCommand::SetWaveWidth { width } => ("/wave/width", vec![osc::Type::Float(*width)]),
        OscCommand::SetBlur { blur } => ("/wave/blur", vec![osc::Type::Float(*blur)]),
        OscCommand::Start => ("/wave/start", Vec::new()),
        OscCommand::Stop => ("/wave/stop", Vec::new()),
    };
    (addr.to_string(), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> osc::Type {
        osc::Type::String(value.to_string())
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(
            parse_message("/wave/theme", &[s("dark")]),
            Ok(OscCommand::SetTheme { theme: Theme::Dark })
        );
        assert_eq!(
            parse_message("/wave/theme", &[osc::Type::Int(0)]),
            Ok(OscCommand::SetTheme { theme: Theme::Light })
        );
        assert!(matches!(
            parse_message("/wave/theme", &[s("sepia")]),
            Err(OscParseError::InvalidValue { .. })
        ));
        assert_eq!(parse_message("/wave/toggletheme", &[]), Ok(OscCommand::ToggleTheme));
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(
            parse_message("/wave/speed", &[s("slow")]),
            Ok(OscCommand::SetSpeed {
                speed: SpeedClass::Slow
            })
        );
        assert!(matches!(
            parse_message("/wave/speed", &[s("warp")]),
            Err(OscParseError::InvalidValue { .. })
        ));
        assert_eq!(
            parse_message("/wave/speed", &[]),
            Err(OscParseError::BadArguments("/wave/speed".to_string()))
        );
    }

    #[test]
    fn test_parse_opacity() {
        assert_eq!(
            parse_message("/wave/opacity", &[osc::Type::Float(0.4)]),
            Ok(OscCommand::SetOpacity { opacity: 0.4 })
        );
        assert_eq!(
            parse_message("/wave/opacity", &[osc::Type::Int(1)]),
            Ok(OscCommand::SetOpacity { opacity: 1.0 })
        );
        assert!(parse_message("/wave/opacity", &[osc::Type::Float(1.2)]).is_err());
        assert!(parse_message("/wave/opacity", &[s("0.4")]).is_err());
    }

    #[test]
    fn test_parse_colors() {
        match parse_message("/wave/colors", &[s("#ff0000"), s("#00f")]) {
            Ok(OscCommand::SetColors { colors }) => {
                assert_eq!(colors, vec![rgb(1.0, 0.0, 0.0), rgb(0.0, 0.0, 1.0)]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_message("/wave/colors", &[]).is_err());
        assert!(parse_message("/wave/colors", &[s("#ff0000"), osc::Type::Int(3)]).is_err());
        assert!(parse_message("/wave/colors", &[s("nope")]).is_err());
    }

    #[test]
    fn test_parse_background_and_sizes() {
        assert_eq!(
            parse_message("/wave/background", &[s("black")]),
            Ok(OscCommand::SetBackground {
                color: rgb(0.0, 0.0, 0.0)
            })
        );
        assert_eq!(
            parse_message("/wave/width", &[osc::Type::Float(20.0)]),
            Ok(OscCommand::SetWaveWidth { width: 20.0 })
        );
        assert!(parse_message("/wave/blur", &[osc::Type::Float(-1.0)]).is_err());
    }

    #[test]
    fn test_parse_lifecycle_and_unknown() {
        assert_eq!(parse_message("/wave/start", &[]), Ok(OscCommand::Start));
        assert_eq!(parse_message("/wave/stop", &[]), Ok(OscCommand::Stop));
        assert_eq!(
            parse_message("/wave/explode", &[]),
            Err(OscParseError::UnknownAddress("/wave/explode".to_string()))
        );
    }

    #[test]
    fn test_encoded_commands_parse_back() {
        let commands = [
            OscCommand::SetTheme { theme: Theme::Dark },
            OscCommand::SetSpeed {
                speed: SpeedClass::Fast,
            },
            OscCommand::SetColors {
                colors: vec![rgb(1.0, 0.0, 0.0), rgb(0.0, 0.0, 1.0)],
            },
            OscCommand::Stop,
        ];
        for command in commands {
            let (addr, args) = encode_command(&command);
            assert_eq!(parse_message(&addr, &args), Ok(command));
        }
    }
}
