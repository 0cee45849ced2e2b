//! 8-bit RGB color type
//!
//! Every stage of the worksheet pipeline works on whole bytes: source pixels,
//! reference palette entries and the hex strings written into the workbook.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color as three 8-bit channels.
///
/// Equality is byte-exact, which is what palette lookups rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure white. Never gets a legend number and is never filled.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    ///
    /// # Example
    /// ```
    /// use grid_quant::Rgb;
    /// let coral = Rgb::from_bytes([255, 127, 80]);
    /// assert_eq!(coral.g, 127);
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns true for pure white (255, 255, 255).
    #[inline]
    pub fn is_white(self) -> bool {
        self == Self::WHITE
    }

    /// Six uppercase hex digits, R then G then B, without a leading `#`.
    ///
    /// # Example
    /// ```
    /// use grid_quant::Rgb;
    /// assert_eq!(Rgb::new(135, 206, 235).to_hex(), "87CEEB");
    /// ```
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Packed `0xRRGGBB` value, the form spreadsheet writers take.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<image::Rgb<u8>> for Rgb {
    #[inline]
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from_bytes(pixel.0)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    #[inline]
    fn from(color: Rgb) -> Self {
        image::Rgb(color.to_bytes())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_quant::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::WHITE);
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_uppercase_and_zero_padded() {
        assert_eq!(Rgb::BLACK.to_hex(), "000000");
        assert_eq!(Rgb::WHITE.to_hex(), "FFFFFF");
        assert_eq!(Rgb::new(10, 171, 5).to_hex(), "0AAB05");
    }

    #[test]
    fn test_packed_value() {
        assert_eq!(Rgb::new(0xFF, 0x7F, 0x50).to_u32(), 0xFF7F50);
        assert_eq!(Rgb::BLACK.to_u32(), 0);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::BLACK), 0);
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::WHITE), 3 * 255 * 255);
        assert_eq!(
            Rgb::new(10, 20, 30).distance_squared(Rgb::new(13, 16, 30)),
            9 + 16
        );
    }

    #[test]
    fn test_parse_hex_formats() {
        assert_eq!("#808080".parse::<Rgb>().unwrap(), Rgb::new(128, 128, 128));
        assert_eq!("ffd700".parse::<Rgb>().unwrap(), Rgb::new(255, 215, 0));
        assert_eq!("  #0F0 ".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(
            "#12345".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidLength
        );
        assert!(matches!(
            "#GG0000".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidHex(_)
        ));
        // Multi-byte characters must not panic on slicing
        assert!("#éé0".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_has_hash_prefix() {
        assert_eq!(Rgb::new(255, 69, 0).to_string(), "#FF4500");
    }

    #[test]
    fn test_image_pixel_conversion() {
        let pixel = image::Rgb([1u8, 2, 3]);
        let color = Rgb::from(pixel);
        assert_eq!(color, Rgb::new(1, 2, 3));
        assert_eq!(image::Rgb::<u8>::from(color), pixel);
    }
}
