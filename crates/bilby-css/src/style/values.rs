//! CSS value types for the restricted grammar.
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;
use strum_macros::{Display as StrumDisplay, EnumString};

/// A specified CSS value.
///
/// `auto` is its own variant rather than a keyword so that every consumer
/// can match on it exhaustively; nothing in the engine compares keyword
/// strings to detect it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// [CSS 2.1 § 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// The `auto` keyword; resolved during layout (width fills the
    /// containing block, auto margins absorb or split the underflow).
    Auto,

    /// Any other identifier value, e.g. `block`, `inline`, `none`.
    Keyword(String),

    /// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
    ///
    /// An absolute length. The dialect's only unit is px.
    Length(f32, Unit),

    /// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
    ///
    /// An sRGB color parsed from hex notation.
    Color(ColorValue),
}

impl Value {
    /// Return true if this value is the `auto` keyword.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Return the length in pixels, or 0.0 for any non-length value.
    ///
    /// This is the default policy every box-model read relies on: a missing
    /// or non-length edge contributes nothing, and `auto` margins count as
    /// zero until the width equation resolves them.
    #[must_use]
    pub const fn to_px(&self) -> f32 {
        match self {
            Self::Length(px, Unit::Px) => *px,
            Self::Auto | Self::Keyword(_) | Self::Color(_) => 0.0,
        }
    }
}

/// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
///
/// Length units. The dialect supports px only; other units are rejected at
/// parse time with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StrumDisplay, EnumString)]
pub enum Unit {
    /// "1px = 1/96th of 1in"
    #[strum(serialize = "px")]
    Px,
}

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
///
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Opaque white, the canvas background.
    pub const WHITE: ColorValue = ColorValue {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Opaque black.
    pub const BLACK: ColorValue = ColorValue {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a `<hex-color>` is a `<hash-token>` token whose value
    /// consists of 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into
            // six-digit form (#RRGGBB) by replicating digits."
            3 => {
                let r = hex_pair(&hex[0..1].repeat(2))?;
                let g = hex_pair(&hex[1..2].repeat(2))?;
                let b = hex_pair(&hex[2..3].repeat(2))?;
                Some(ColorValue { r, g, b, a: 255 })
            }
            // Four-digit RGBA notation (#RGBA)
            4 => {
                let r = hex_pair(&hex[0..1].repeat(2))?;
                let g = hex_pair(&hex[1..2].repeat(2))?;
                let b = hex_pair(&hex[2..3].repeat(2))?;
                let a = hex_pair(&hex[3..4].repeat(2))?;
                Some(ColorValue { r, g, b, a })
            }
            // Six-digit RGB notation (#RRGGBB)
            6 => {
                let r = hex_pair(&hex[0..2])?;
                let g = hex_pair(&hex[2..4])?;
                let b = hex_pair(&hex[4..6])?;
                Some(ColorValue { r, g, b, a: 255 })
            }
            // Eight-digit RGBA notation (#RRGGBBAA)
            8 => {
                let r = hex_pair(&hex[0..2])?;
                let g = hex_pair(&hex[2..4])?;
                let b = hex_pair(&hex[4..6])?;
                let a = hex_pair(&hex[6..8])?;
                Some(ColorValue { r, g, b, a })
            }
            _ => None,
        }
    }
}

/// Parse two hexadecimal digits into a byte.
fn hex_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_px_length() {
        assert!((Value::Length(12.5, Unit::Px).to_px() - 12.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_to_px_non_lengths_are_zero() {
        assert!(Value::Auto.to_px().abs() < f32::EPSILON);
        assert!(Value::Keyword("block".to_string()).to_px().abs() < f32::EPSILON);
        assert!(Value::Color(ColorValue::BLACK).to_px().abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_hex_six_digits() {
        let c = ColorValue::from_hex("2563eb").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0x25, 0x63, 0xeb, 255));
    }

    #[test]
    fn test_from_hex_three_digit_replication() {
        let c = ColorValue::from_hex("#fa0").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0xff, 0xaa, 0x00, 255));
    }

    #[test]
    fn test_from_hex_eight_digits_with_alpha() {
        let c = ColorValue::from_hex("00ff0080").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0, 255, 0, 0x80));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(ColorValue::from_hex("xyz").is_none());
        assert!(ColorValue::from_hex("12345").is_none());
        assert!(ColorValue::from_hex("").is_none());
    }

    #[test]
    fn test_unit_round_trips_through_strings() {
        assert_eq!(Unit::Px.to_string(), "px");
        assert_eq!("px".parse::<Unit>(), Ok(Unit::Px));
        assert!("em".parse::<Unit>().is_err());
    }
}
