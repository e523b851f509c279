//! Construction-time configuration for the countdown widget
//!
//! The widget itself never parses anything. Hosts that configure it
//! declaratively (a settings file, a layout description) deserialize a
//! [`CountdownConfig`] and hand it to [`Countdown::from_config`].
//!
//! [`Countdown::from_config`]: super::Countdown::from_config

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BACKGROUND: Argb = Argb(0xFFFF_FFFF);
pub const DEFAULT_RING: Argb = Argb(0xFFEE_EEEE);
pub const DEFAULT_PROGRESS: Argb = Argb(0xFFFF_0000);
pub const DEFAULT_TEXT: Argb = Argb(0xFF21_2121);

/// Default text size in scale-independent pixels
pub const DEFAULT_TEXT_SIZE_SP: f32 = 12.0;
/// Default countdown length in seconds
pub const DEFAULT_DURATION_SECS: f32 = 3.0;
/// Ring stroke width in density-independent pixels
pub const STROKE_WIDTH_DP: f32 = 3.0;
/// Side length used for an axis the host leaves flexible
pub const DEFAULT_SIDE_DP: f32 = 50.0;

/// Packed `0xAARRGGBB` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "String")]
pub struct Argb(pub u32);

impl Argb {
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Convert to an iced color with straight (non-premultiplied) alpha
    pub fn to_color(self) -> iced::Color {
        iced::Color::from_rgba8(
            self.red(),
            self.green(),
            self.blue(),
            self.alpha() as f32 / 255.0,
        )
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for String {
    fn from(color: Argb) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Argb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl std::str::FromStr for Argb {
    type Err = ColorParseError;

    /// Parse `#RRGGBB` or `#AARRGGBB`; a missing alpha channel means opaque
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(s.to_string()));
        }

        let opaque = match hex.len() {
            6 => true,
            8 => false,
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ColorParseError::InvalidHex(s.to_string()))?;
        Ok(Self(if opaque { 0xFF00_0000 | value } else { value }))
    }
}

/// Raw color as it appears in a configuration file
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Packed(u32),
    Hex(String),
}

impl TryFrom<ColorValue> for Argb {
    type Error = ColorParseError;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Packed(v) => Ok(Self(v)),
            ColorValue::Hex(s) => s.parse(),
        }
    }
}

/// Errors produced while reading a color attribute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} is not a hexadecimal value")]
    InvalidHex(String),
    #[error("expected 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
}

/// Display density used to turn dp/sp units into pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    /// Pixels per density-independent pixel
    pub density: f32,
    /// Pixels per scale-independent pixel (density times the user's font scale)
    pub scaled_density: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

impl Density {
    pub fn new(density: f32, scaled_density: f32) -> Self {
        Self {
            density,
            scaled_density,
        }
    }

    /// Density-independent pixels to whole pixels, rounded half up
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        (dp * self.density + 0.5).floor()
    }

    /// Scale-independent pixels to whole pixels, rounded half up
    pub fn sp_to_px(&self, sp: f32) -> f32 {
        (sp * self.scaled_density + 0.5).floor()
    }
}

/// Declarative widget attributes, read once when the widget is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Countdown length in seconds
    pub duration_secs: f32,
    /// Color of the arc that sweeps as time passes
    pub progress_color: Argb,
    /// Color of the full base ring
    pub ring_color: Argb,
    /// Fill behind the ring
    pub background_color: Argb,
    /// Fixed caption; when absent the remaining seconds are shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_text: Option<String>,
    pub text_color: Argb,
    /// Label size in scale-independent pixels
    pub text_size_sp: f32,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            progress_color: DEFAULT_PROGRESS,
            ring_color: DEFAULT_RING,
            background_color: DEFAULT_BACKGROUND,
            center_text: None,
            text_color: DEFAULT_TEXT,
            text_size_sp: DEFAULT_TEXT_SIZE_SP,
        }
    }
}

impl CountdownConfig {
    /// Duration in whole milliseconds, truncating sub-millisecond fractions
    pub fn duration_ms(&self) -> i64 {
        (self.duration_secs * 1000.0) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#FF4081".parse::<Argb>(), Ok(Argb(0xFFFF_4081)));
        assert_eq!("#803F51B5".parse::<Argb>(), Ok(Argb(0x803F_51B5)));
        assert_eq!(" #ffffff ".parse::<Argb>(), Ok(Argb(0xFFFF_FFFF)));
    }

    #[test]
    fn test_parse_rejects_malformed_colors() {
        assert!(matches!(
            "FF4081".parse::<Argb>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#GG4081".parse::<Argb>(),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert_eq!(
            "#FFF".parse::<Argb>(),
            Err(ColorParseError::InvalidLength(3))
        );
        assert!(matches!(
            "#+FFFFFFF".parse::<Argb>(),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert_eq!(
            "#FFFFFFFFF".parse::<Argb>(),
            Err(ColorParseError::InvalidLength(9))
        );
        assert_eq!("#".parse::<Argb>(), Err(ColorParseError::InvalidLength(0)));
    }

    #[test]
    fn test_channels_and_conversion() {
        let color = Argb(0x80FF_4081);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.red(), 0xFF);
        assert_eq!(color.green(), 0x40);
        assert_eq!(color.blue(), 0x81);

        let iced_color = Argb(0xFFFF_0000).to_color();
        assert_eq!(iced_color, iced::Color::from_rgb8(0xFF, 0x00, 0x00));
    }

    #[test]
    fn test_density_rounding() {
        let density = Density::new(2.75, 3.3);
        assert_eq!(density.dp_to_px(3.0), 8.0);
        assert_eq!(density.dp_to_px(50.0), 138.0);
        assert_eq!(density.sp_to_px(12.0), 40.0);
        assert_eq!(Density::default().dp_to_px(50.0), 50.0);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: CountdownConfig =
            serde_json::from_str(r##"{ "duration_secs": 5.0, "progress_color": "#FF4081" }"##)
                .unwrap();
        assert_eq!(config.duration_ms(), 5000);
        assert_eq!(config.progress_color, Argb(0xFFFF_4081));
        assert_eq!(config.ring_color, DEFAULT_RING);
        assert_eq!(config.center_text, None);
        assert_eq!(config.text_size_sp, DEFAULT_TEXT_SIZE_SP);
    }

    #[test]
    fn test_config_accepts_packed_colors() {
        let config: CountdownConfig =
            serde_json::from_str(r#"{ "text_color": 4282339765 }"#).unwrap();
        assert_eq!(config.text_color, Argb(0xFF3F_51B5));
    }

    #[test]
    fn test_config_rejects_bad_color() {
        let result = serde_json::from_str::<CountdownConfig>(r#"{ "ring_color": "blue" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serializes_colors_as_hex() {
        let json = serde_json::to_value(CountdownConfig::default()).unwrap();
        assert_eq!(json["progress_color"], "#FFFF0000");
        assert!(json.get("center_text").is_none());
    }
}
