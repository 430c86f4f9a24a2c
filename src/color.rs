//! RGBA color values, packing, hex text form, and "over" compositing.
//!
//! A [`Color`] is a plain value. Only `r`, `g`, `b` survive packing into the
//! matrix buffer; alpha exists so a color can be blended over what is already
//! stored (see [`Color::blend`]).
//!
//! Every float-to-channel conversion in this module rounds half-up and then
//! saturates to `0..=255`. NaN becomes 0.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::RgbColor;
use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

use crate::{Error, Result};

/// An RGBA color with 8 bits per channel.
///
/// `a` is opacity: 255 is fully opaque, 0 fully transparent.
///
/// # Example
///
/// ```rust
/// use pixel_matrix::Color;
///
/// let orange = Color::from_hex("#ff8000")?;
/// assert_eq!(orange.rgb(), [255, 128, 0]);
/// assert_eq!(orange.to_u32(), 0x00ff_8000);
///
/// let faint_blue = Color::BLUE.with_alpha(64);
/// let mixed = Color::blend(orange, faint_blue);
/// assert_eq!(mixed.rgba(), [191, 96, 64, 255]);
/// # Ok::<(), pixel_matrix::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create an opaque color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    /// Create an opaque color from its channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b)
    }

    /// Create a color with explicit opacity.
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from hue, saturation, and value, each in `[0, 1]`.
    ///
    /// Inputs are not validated. Hue wraps by sector, so `h = 1.0` is red again;
    /// saturation and value outside `[0, 1]` saturate the resulting channels.
    /// The sector arithmetic runs in `f64`, so channels that land exactly on a
    /// half level round up.
    ///
    /// ```rust
    /// use pixel_matrix::Color;
    ///
    /// assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::RED);
    /// assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0), Color::BLUE);
    /// assert_eq!(Color::from_hsv(0.5, 0.0, 0.5).rgb(), [128, 128, 128]);
    /// ```
    #[must_use]
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        Self::from_hsva(h, s, v, u8::MAX)
    }

    /// Like [`Self::from_hsv`] with an explicit alpha.
    #[must_use]
    pub fn from_hsva(h: f64, s: f64, v: f64, a: u8) -> Self {
        let scaled_hue = h * 6.0;
        let sector = floor_to_i32(scaled_hue);
        let fraction = scaled_hue - f64::from(sector);
        let p = v * (1.0 - s);
        let q = v * (1.0 - fraction * s);
        let t = v * (1.0 - (1.0 - fraction) * s);
        let (r, g, b) = match sector.rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::from_rgba(
            channel_from_f64(r * 255.0),
            channel_from_f64(g * 255.0),
            channel_from_f64(b * 255.0),
            a,
        )
    }

    /// Unpack an opaque color from `0x__RRGGBB`. The top byte is ignored.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        let [_, r, g, b] = packed.to_be_bytes();
        Self::new(r, g, b)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The `#` is optional and digits are
    /// case-insensitive; a missing alpha pair means opaque.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHexColor`] for anything else. There is no
    /// fallback color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidHexColor {
            input: String::from(hex),
        };
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |start: usize| {
            digits
                .get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { u8::MAX };
        Ok(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Composite `over` on top of `under` with the "over" operator.
    ///
    /// Each channel becomes `round(under * (1 - α) + over * α)` with
    /// `α = over.a / 255`. The result is always opaque, so an opaque `over`
    /// replaces `under` and a transparent one leaves it unchanged.
    #[must_use]
    pub fn blend(under: Self, over: Self) -> Self {
        Self::blend_with_opacity(under, over, f32::from(over.a) / 255.0)
    }

    /// "Over" with an explicit fractional opacity in `[0, 1]`; `over.a` is
    /// ignored. Channels are rounded once, after mixing.
    pub(crate) fn blend_with_opacity(under: Self, over: Self, alpha: f32) -> Self {
        let mix = |below: u8, above: u8| {
            channel_from_f32(f32::from(below) * (1.0 - alpha) + f32::from(above) * alpha)
        };
        Self::new(
            mix(under.r, over.r),
            mix(under.g, over.g),
            mix(under.b, over.b),
        )
    }

    /// Copy of this color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Scale `r`, `g`, `b` by `ratio` (for dimming); alpha is kept.
    #[must_use]
    pub fn with_ratio(self, ratio: f32) -> Self {
        let scale = |channel: u8| channel_from_f32(f32::from(channel) * ratio);
        Self::from_rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Pack into `0x00RRGGBB`. Alpha is dropped.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }

    /// `[r, g, b]`.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// `[r, g, b, a]`.
    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether `a == 255`.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not opaque.
    ///
    /// ```rust
    /// use pixel_matrix::Color;
    ///
    /// assert_eq!(Color::from_hex("FF8000")?.to_hex(), "#ff8000");
    /// assert_eq!(Color::from_hex("#FF800080")?.to_hex(), "#ff800080");
    /// assert_eq!(Color::from_hex("#ff8000FF")?.to_hex(), "#ff8000");
    /// # Ok::<(), pixel_matrix::Error>(())
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        alloc::format!("{self}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(formatter, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(hex: &str) -> Result<Self> {
        Self::from_hex(hex)
    }
}

impl From<RGB8> for Color {
    fn from(color: RGB8) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

impl From<Color> for RGB8 {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

/// Convert colors to [`RGB8`] for LED strip output. Alpha is dropped.
///
/// # Example
///
/// ```rust
/// use embedded_graphics::pixelcolor::Rgb888;
/// use pixel_matrix::{Color, ToRgb8};
/// use smart_leds::RGB8;
///
/// let from_color = Color::from_rgba(16, 32, 48, 10).to_rgb8();
/// let from_rgb888 = Rgb888::new(16, 32, 48).to_rgb8();
///
/// assert_eq!(from_color, RGB8::new(16, 32, 48));
/// assert_eq!(from_color, from_rgb888);
/// ```
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for Color {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        self.into()
    }
}

impl ToRgb8 for RGB8 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for Rgb888 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.r(), self.g(), self.b())
    }
}

/// Convert colors to [`Rgb888`] for `embedded-graphics` interop. Alpha is dropped.
pub trait ToRgb888 {
    /// Convert this color to [`Rgb888`].
    #[must_use]
    fn to_rgb888(self) -> Rgb888;
}

impl ToRgb888 for Color {
    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        self.into()
    }
}

impl ToRgb888 for RGB8 {
    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl ToRgb888 for Rgb888 {
    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        self
    }
}

/// Round half-up, then saturate into `0..=255`.
fn channel_from_f32(value: f32) -> u8 {
    // `as` saturates and maps NaN to 0.
    (value + 0.5) as u8
}

fn channel_from_f64(value: f64) -> u8 {
    (value + 0.5) as u8
}

fn floor_to_i32(value: f64) -> i32 {
    let truncated = value as i32;
    if f64::from(truncated) > value {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}
