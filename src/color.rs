//! Hex color parsing for watermark styling

use crate::error::{Error, Result};

/// RGB color with components normalized to the 0.0..=1.0 range expected
/// by PDF `rg` operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };

    /// Parse a `#rrggbb` (or `rrggbb`) hex color string
    pub fn from_hex(hex: &str) -> Result<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<f32> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_black_and_white() {
        assert_eq!(Rgb::from_hex("#000000").unwrap(), Rgb::BLACK);
        let white = Rgb::from_hex("#ffffff").unwrap();
        assert_eq!(white, Rgb { r: 1.0, g: 1.0, b: 1.0 });
    }

    #[test]
    fn test_parse_without_hash() {
        let red = Rgb::from_hex("ff0000").unwrap();
        assert_eq!(red, Rgb { r: 1.0, g: 0.0, b: 0.0 });
    }

    #[test]
    fn test_parse_mixed_case() {
        let c = Rgb::from_hex("#AbCdEf").unwrap();
        assert!((c.r - 0xAB as f32 / 255.0).abs() < 1e-6);
        assert!((c.g - 0xCD as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xEF as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_rejected() {
        for bad in ["", "#fff", "#gggggg", "#1234567", "red"] {
            assert!(matches!(Rgb::from_hex(bad), Err(Error::InvalidColor(_))));
        }
    }
}
