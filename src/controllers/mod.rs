pub mod osc;

pub use osc::{
    encode_command, parse_message, ControllerError, OscCommand, OscController, OscParseError,
    OscSender,
};
