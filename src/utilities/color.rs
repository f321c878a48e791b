// src/utilities/color.rs
//
// Parsing of the CSS-style color strings used in config.toml and OSC messages

use nannou::prelude::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("purple", (128, 0, 128)),
];

/// Parses `#rgb`, `#rrggbb` or a basic CSS color name into an `Rgb`.
pub fn parse_color(input: &str) -> Result<Rgb, ColorError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(s.to_string()));
    }

    let lower = s.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, (r, g, b))| rgb_from_u8(*r, *g, *b))
        .ok_or_else(|| ColorError::UnknownName(s.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex
                .chars()
                .map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            Some(rgb_from_u8(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(rgb_from_u8(r, g, b))
        }
        _ => None,
    }
}

fn rgb_from_u8(r: u8, g: u8, b: u8) -> Rgb {
    rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Formats a color as `#rrggbb`.
pub fn to_hex(color: Rgb) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.red),
        channel(color.green),
        channel(color.blue)
    )
}

/// Parses every entry, failing on the first invalid one.
pub fn parse_palette<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Rgb>, ColorError> {
    colors.iter().map(|c| parse_color(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(color: Rgb, r: f32, g: f32, b: f32) {
        assert!((color.red - r).abs() < 1e-6, "red {} != {}", color.red, r);
        assert!((color.green - g).abs() < 1e-6, "green {} != {}", color.green, g);
        assert!((color.blue - b).abs() < 1e-6, "blue {} != {}", color.blue, b);
    }

    #[test]
    fn test_parse_long_hex() {
        let color = parse_color("#38bdf8").unwrap();
        assert_rgb(color, 56.0 / 255.0, 189.0 / 255.0, 248.0 / 255.0);

        let upper = parse_color("#FFFDF7").unwrap();
        assert_rgb(upper, 1.0, 253.0 / 255.0, 247.0 / 255.0);
    }

    #[test]
    fn test_parse_short_hex() {
        let color = parse_color("#f0a").unwrap();
        assert_rgb(color, 1.0, 0.0, 170.0 / 255.0);
    }

    #[test]
    fn test_parse_named() {
        assert_rgb(parse_color("black").unwrap(), 0.0, 0.0, 0.0);
        assert_rgb(parse_color(" White ").unwrap(), 1.0, 1.0, 1.0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(
            parse_color("#12345"),
            Err(ColorError::InvalidHex("#12345".to_string()))
        );
        assert_eq!(
            parse_color("#zzzzzz"),
            Err(ColorError::InvalidHex("#zzzzzz".to_string()))
        );
        assert_eq!(
            parse_color("salmonish"),
            Err(ColorError::UnknownName("salmonish".to_string()))
        );
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(rgb(1.0, 0.0, 0.0)), "#ff0000");
        assert_eq!(to_hex(parse_color("#38bdf8").unwrap()), "#38bdf8");
        assert_eq!(to_hex(rgb(2.0, -1.0, 0.5)), "#ff0080");
    }

    #[test]
    fn test_parse_palette_stops_on_bad_entry() {
        assert_eq!(parse_palette(&["#000", "#fff"][..]).unwrap().len(), 2);
        assert!(parse_palette(&["#000", "nope"][..]).is_err());
    }
}
