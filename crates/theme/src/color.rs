use std::fmt;

use thiserror::Error;

/// 8-bit RGBA color resolved from a theme's CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic CSS color name.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }
        match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => named_color(trimmed).ok_or_else(|| ColorParseError::UnknownName {
                value: trimmed.to_string(),
            }),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color is empty")]
    Empty,
    #[error("expected 3, 6 or 8 hexadecimal digits")]
    InvalidLength,
    #[error("contains non-hexadecimal digits")]
    InvalidHex,
    #[error("unknown color name '{value}'")]
    UnknownName { value: String },
}

fn parse_hex(hex: &str) -> Result<Rgba, ColorParseError> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex);
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                let digit = ch.to_digit(16).ok_or(ColorParseError::InvalidHex)? as u8;
                rgb[i] = digit * 17;
            }
            Ok(Rgba::new(rgb[0], rgb[1], rgb[2], 255))
        }
        6 | 8 => {
            let mut rgba = [0u8, 0, 0, 255];
            for i in 0..(hex.len() / 2) {
                let start = i * 2;
                rgba[i] = u8::from_str_radix(&hex[start..start + 2], 16)
                    .map_err(|_| ColorParseError::InvalidHex)?;
            }
            Ok(Rgba::new(rgba[0], rgba[1], rgba[2], rgba[3]))
        }
        _ => Err(ColorParseError::InvalidLength),
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::new(255, 0, 0, 255),
        "green" => Rgba::new(0, 128, 0, 255),
        "lime" => Rgba::new(0, 255, 0, 255),
        "blue" => Rgba::new(0, 0, 255, 255),
        "yellow" => Rgba::new(255, 255, 0, 255),
        "cyan" | "aqua" => Rgba::new(0, 255, 255, 255),
        "magenta" | "fuchsia" => Rgba::new(255, 0, 255, 255),
        "gray" | "grey" => Rgba::new(128, 128, 128, 255),
        "silver" => Rgba::new(192, 192, 192, 255),
        "maroon" => Rgba::new(128, 0, 0, 255),
        "olive" => Rgba::new(128, 128, 0, 255),
        "navy" => Rgba::new(0, 0, 128, 255),
        "purple" => Rgba::new(128, 0, 128, 255),
        "teal" => Rgba::new(0, 128, 128, 255),
        "orange" => Rgba::new(255, 165, 0, 255),
        "transparent" => Rgba::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#ffAA33").unwrap(), Rgba::new(0xFF, 0xAA, 0x33, 0xFF));
        assert_eq!(Rgba::parse("#11223344").unwrap().a, 0x44);
        assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(Rgba::parse("White").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::parse(" navy ").unwrap(), Rgba::new(0, 0, 128, 255));
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(Rgba::parse("").unwrap_err(), ColorParseError::Empty);
        assert_eq!(Rgba::parse("#1234").unwrap_err(), ColorParseError::InvalidLength);
        assert_eq!(Rgba::parse("#12345g").unwrap_err(), ColorParseError::InvalidHex);
        assert!(matches!(
            Rgba::parse("chartreuse-ish").unwrap_err(),
            ColorParseError::UnknownName { .. }
        ));
    }

    #[test]
    fn displays_as_css_hex() {
        assert_eq!(Rgba::new(1, 2, 3, 255).to_string(), "#010203");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "#01020304");
    }
}
