//! Colours, highlight states and the panel theme.
//!
//! Widgets only remember *which* highlight a region shows; the theme turns
//! that into a pixel colour at paint time.

use serde::{Deserialize, Serialize};

use crate::error::UiError;
use crate::input::Transition;

/// An 8-bit RGB pixel, laid out exactly as the texture expects it.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Solid black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a colour from `0xRRGGBB`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Creates a colour from integer channels, clamping each into `0..=255`.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let channel = |c: i32| c.clamp(0, 255) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Returns the channels as an array.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parses `#rgb` or `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidColor`] for anything else.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse(text: &str) -> Result<Self, UiError> {
        let invalid = || UiError::InvalidColor(text.to_string());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::hex(value)),
            3 => {
                let expand = |nibble: u32| ((nibble & 0xf) * 0x11) as u8;
                Ok(Self::new(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = UiError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<Rgb8> for String {
    fn from(color: Rgb8) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Visual state of one interactive region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Idle.
    #[default]
    Neutral,
    /// Pointer over the region, button not held.
    Hover,
    /// Region captured and button held.
    Active,
}

impl Highlight {
    /// Resolves the highlight of a region for one pointer sample.
    ///
    /// Hover applies while the button is not held; the active shade applies
    /// only to the captured region while it is held.
    #[must_use]
    pub fn resolve(transition: Transition, hit: bool, captured: bool) -> Self {
        match transition {
            t if t.is_hover_phase() && hit => Self::Hover,
            Transition::Held if captured => Self::Active,
            _ => Self::Neutral,
        }
    }
}

/// Colours used to paint widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Strip background.
    pub background: Rgb8,
    /// Text, outlines and tracks.
    pub ink: Rgb8,
    /// Fill of an idle handle or button.
    pub neutral: Rgb8,
    /// Fill under the pointer.
    pub hover: Rgb8,
    /// Fill of the captured region while held.
    pub active: Rgb8,
}

impl Theme {
    /// Black ink on white, grey highlights.
    pub const PAPER: Self = Self {
        background: Rgb8::WHITE,
        ink: Rgb8::BLACK,
        neutral: Rgb8::WHITE,
        hover: Rgb8::hex(0xeeeeee),
        active: Rgb8::hex(0xdddddd),
    };

    /// Returns the fill colour for a highlight state.
    #[must_use]
    pub const fn fill(&self, highlight: Highlight) -> Rgb8 {
        match highlight {
            Highlight::Neutral => self.neutral,
            Highlight::Hover => self.hover,
            Highlight::Active => self.active,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::PAPER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!(Rgb8::parse("#fff"), Ok(Rgb8::WHITE));
        assert_eq!(Rgb8::parse("#eeeeee"), Ok(Rgb8::new(0xee, 0xee, 0xee)));
        assert_eq!(Rgb8::parse("#1a2B3c"), Ok(Rgb8::new(0x1a, 0x2b, 0x3c)));
        assert!(Rgb8::parse("fff").is_err());
        assert!(Rgb8::parse("#ffff").is_err());
        assert!(Rgb8::parse("#+ff").is_err());
    }

    #[test]
    fn test_color_display_round_trip() {
        let color = Rgb8::new(100, 200, 255);
        assert_eq!(Rgb8::parse(&color.to_string()), Ok(color));
    }

    #[test]
    fn test_clamped_channels() {
        assert_eq!(Rgb8::clamped(100, 200, 300), Rgb8::new(100, 200, 255));
        assert_eq!(Rgb8::clamped(-5, 0, 255), Rgb8::new(0, 0, 255));
    }

    #[test]
    fn test_highlight_rules() {
        assert_eq!(Highlight::resolve(Transition::None, true, false), Highlight::Hover);
        assert_eq!(Highlight::resolve(Transition::Pressed, true, false), Highlight::Hover);
        assert_eq!(Highlight::resolve(Transition::None, false, false), Highlight::Neutral);
        assert_eq!(Highlight::resolve(Transition::Held, false, true), Highlight::Active);
        assert_eq!(Highlight::resolve(Transition::Held, true, false), Highlight::Neutral);
        assert_eq!(Highlight::resolve(Transition::Released, true, true), Highlight::Neutral);
    }

    #[test]
    fn test_theme_fill() {
        let theme = Theme::default();
        assert_eq!(theme.fill(Highlight::Neutral), Rgb8::WHITE);
        assert_eq!(theme.fill(Highlight::Hover), Rgb8::hex(0xeeeeee));
        assert_eq!(theme.fill(Highlight::Active), Rgb8::hex(0xdddddd));
    }
}
