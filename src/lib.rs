//! Addressable pixel buffers for NeoPixel-style (WS2812) LED panels.
//!
//! A [`PixelMatrix`] stores a rectangular panel as one flat buffer of packed
//! `0x00RRGGBB` values in the order the LEDs are wired, and lets you work in
//! `(x, y)` space instead. [`MatrixOptions`] describes the wiring: mirrored
//! axes and serpentine ("zigzag") columns.
//!
//! Writes composite with alpha. [`PixelMatrix::set_color`],
//! [`PixelMatrix::fill_color`] and [`PixelMatrix::set_matrix`] all blend the
//! incoming [`Color`] over what is stored, so a translucent color tints and an
//! opaque one overwrites.
//!
//! # Example
//!
//! ```rust
//! use pixel_matrix::{Color, MatrixOptions, PixelMatrix, Point};
//!
//! let mut matrix = PixelMatrix::new(4, 4, MatrixOptions::default());
//! matrix.set_color(Point::new(0.0, 0.0), Color::RED);
//! assert_eq!(matrix.color_at(Point::new(0.0, 0.0)).rgb(), [255, 0, 0]);
//!
//! // Half-transparent white over red.
//! matrix.set_color(Point::new(0.0, 0.0), Color::WHITE.with_alpha(128));
//! assert_eq!(matrix.color_at(Point::new(0.0, 0.0)).rgb(), [255, 128, 128]);
//!
//! // Off the panel: ignored.
//! matrix.set_color(Point::new(-1.0, 7.0), Color::BLUE);
//! ```
//!
//! # Features
//!
//! - **`defmt`** — log through [`defmt`](https://docs.rs/defmt) and derive
//!   `defmt::Format` on the public value types.
//! - **`host`** — build with `std` and enable [`to_png`] previews.
#![cfg_attr(not(feature = "host"), no_std)]

extern crate alloc;

// Must stay first so the logging macros are in scope for the modules below.
#[macro_use]
mod fmt;

mod color;
mod error;
pub mod pixel_matrix;
#[cfg(feature = "host")]
pub mod to_png;

pub use crate::color::{Color, ToRgb8, ToRgb888};
pub use crate::error::{Error, Result};
pub use crate::pixel_matrix::buffer::PixelBuffer;
pub use crate::pixel_matrix::layout::{MatrixLayout, MatrixOptions, Point};
pub use crate::pixel_matrix::{PixelMatrix, StampOptions};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used by LED strip drivers.
pub use smart_leds::RGB8;
