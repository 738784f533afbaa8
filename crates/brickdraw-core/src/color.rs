//! Color handling for Brickdraw diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Connection colors are persisted as 8-bit RGB
//! channels, so the wrapper also converts to and from [`Rgb8`] triples.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// An opaque 8-bit sRGB triple as stored in diagram documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb8 {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickdraw_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque color from 8-bit sRGB channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickdraw_core::color::{Color, Rgb8};
    ///
    /// let orange = Color::from_rgb8(Rgb8::new(255, 128, 0));
    /// assert_eq!(orange.to_rgb8(), Rgb8::new(255, 128, 0));
    /// ```
    pub fn from_rgb8(rgb: Rgb8) -> Self {
        let srgb = AlphaColor::<Srgb>::from_rgba8(rgb.red, rgb.green, rgb.blue, 255);
        Self {
            color: DynamicColor::from_alpha_color(srgb),
        }
    }

    /// Returns the 8-bit sRGB channels of this color, dropping alpha.
    pub fn to_rgb8(self) -> Rgb8 {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        Rgb8::new(rgba.r, rgba.g, rgba.b)
    }

    /// Creates a new color with the specified alpha (transparency) value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(Rgb8::default())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        Self::from_rgb8(rgb)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
