// src/views/mod.rs

pub mod background;

pub use background::{ConfigChange, WaveBackground};
