//! RGBA colors and color-string parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// RGBA color with components in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string is empty.
    #[error("empty color string")]
    Empty,
    /// A `#` color with the wrong number of digits or a non-hex digit.
    #[error("invalid hex color `{0}`")]
    Hex(String),
    /// An `rgb()`/`rgba()` form with bad arguments.
    #[error("invalid functional color `{0}`")]
    Functional(String),
    /// Anything else.
    #[error("unknown color `{0}`")]
    Unknown(String),
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Create an opaque gray with the given 8-bit level.
    pub fn gray(level: f32) -> Self {
        let v = (level / 255.0).clamp(0.0, 1.0);
        Self::new(v, v, v, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Return the same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors, `t` clamped to 0..=1.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Parse a CSS-style color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` and a handful of named colors.
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::Hex(text.to_string()));
        }
        let lower = text.to_ascii_lowercase();
        if let Some(args) = functional_args(&lower, "rgba") {
            return parse_functional(args, true)
                .ok_or_else(|| ColorParseError::Functional(text.to_string()));
        }
        if let Some(args) = functional_args(&lower, "rgb") {
            return parse_functional(args, false)
                .ok_or_else(|| ColorParseError::Functional(text.to_string()));
        }
        named(&lower).ok_or_else(|| ColorParseError::Unknown(text.to_string()))
    }

    fn channel_u8(value: f32) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            Self::channel_u8(self.r),
            Self::channel_u8(self.g),
            Self::channel_u8(self.b)
        )?;
        if self.a < 1.0 {
            write!(f, "{:02x}", Self::channel_u8(self.a))?;
        }
        Ok(())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb8(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Some(Color::rgb8(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Color::rgb8(pair(0)?, pair(2)?, pair(4)?).with_alpha(f32::from(pair(6)?) / 255.0)),
        _ => None,
    }
}

fn functional_args<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let mut channels = [0.0_f32; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let value: f32 = part.parse().ok()?;
        if !(0.0..=255.0).contains(&value) {
            return None;
        }
        *slot = value / 255.0;
    }
    let alpha = if with_alpha {
        let value: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&value) {
            return None;
        }
        value
    } else {
        1.0
    };
    Some(Color::new(channels[0], channels[1], channels[2], alpha))
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "transparent" => Color::TRANSPARENT,
        "red" => Color::rgb8(255, 0, 0),
        "green" => Color::rgb8(0, 128, 0),
        "lime" => Color::rgb8(0, 255, 0),
        "blue" => Color::rgb8(0, 0, 255),
        "yellow" => Color::rgb8(255, 255, 0),
        "cyan" | "aqua" => Color::rgb8(0, 255, 255),
        "magenta" | "fuchsia" => Color::rgb8(255, 0, 255),
        "orange" => Color::rgb8(255, 165, 0),
        "gray" | "grey" => Color::rgb8(128, 128, 128),
        _ => return None,
    };
    Some(color)
}
