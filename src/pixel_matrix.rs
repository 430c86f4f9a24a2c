//! A flat buffer of packed colors addressed by panel coordinates.
//!
//! Every write composites the incoming [`Color`] over the stored one (see
//! [`Color::blend`]), so a translucent color tints instead of replacing, and an
//! opaque color overwrites. Coordinates outside the panel are clipped: writes
//! do nothing and reads return opaque black.
//!
//! # Example: stamp a weighted mask onto a serpentine panel
//!
//! ```rust
//! use pixel_matrix::{Color, MatrixOptions, PixelMatrix, Point, StampOptions};
//!
//! let mut matrix = PixelMatrix::new(4, 4, MatrixOptions::zigzag());
//!
//! // A soft dot: full intensity in the middle, half on the arms.
//! let dot = [[0.0, 0.5, 0.0], [0.5, 1.0, 0.5], [0.0, 0.5, 0.0]];
//! matrix.set_matrix(&dot, Color::RED, StampOptions::at(1, 1));
//!
//! assert_eq!(matrix.color_at(Point::new(2.0, 2.0)), Color::RED);
//! assert_eq!(matrix.color_at(Point::new(2.0, 1.0)).rgb(), [128, 0, 0]);
//! assert_eq!(matrix.color_at(Point::new(1.0, 1.0)), Color::BLACK);
//!
//! // The packed buffer is in wire order, ready for a strip driver.
//! assert_eq!(matrix.as_slice().len(), 16);
//! ```

pub mod buffer;
pub mod layout;

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::Rgb888,
};
use smart_leds::RGB8;

use crate::{Color, Error, Result, ToRgb8};
use buffer::{PixelBuffer, pixels_from_bytes};
use layout::{MatrixLayout, MatrixOptions, Point};

/// Placement of a [`PixelMatrix::set_matrix`] stamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StampOptions {
    /// Added to each mask column.
    pub x_offset: i32,
    /// Added to each mask row.
    pub y_offset: i32,
}

impl StampOptions {
    /// Stamp with the mask's top-left cell at `(x_offset, y_offset)`.
    #[must_use]
    pub const fn at(x_offset: i32, y_offset: i32) -> Self {
        Self { x_offset, y_offset }
    }
}

/// A `width × height` grid of packed colors with LED-panel addressing.
///
/// Storage is either owned ([`Self::new`]) or a zero-copy view over caller
/// memory ([`Self::from_buffer`], [`Self::from_pixels`]); see [`PixelBuffer`].
/// Dimensions and wiring are fixed for the matrix's lifetime.
///
/// The matrix is also an `embedded-graphics` [`DrawTarget`], so any drawing
/// library built on it can paint here. Drawn pixels are opaque writes and are
/// clipped like [`Self::set_color`].
///
/// Equality compares layout and pixels, not the storage kind: an owned and a
/// borrowed matrix with the same contents are equal.
#[derive(Debug)]
pub struct PixelMatrix<'a> {
    layout: MatrixLayout,
    pixels: PixelBuffer<'a>,
}

impl<'b> PartialEq<PixelMatrix<'b>> for PixelMatrix<'_> {
    fn eq(&self, other: &PixelMatrix<'b>) -> bool {
        self.layout == other.layout && self.as_slice() == other.as_slice()
    }
}

impl Eq for PixelMatrix<'_> {}

impl PixelMatrix<'static> {
    /// An owned, all-black matrix.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    #[must_use]
    pub fn new(width: usize, height: usize, options: MatrixOptions) -> Self {
        let layout = MatrixLayout::new(width, height, options);
        debug!("PixelMatrix::new: {}x{} owned", width, height);
        Self {
            layout,
            pixels: PixelBuffer::black(layout.len()),
        }
    }
}

impl<'a> PixelMatrix<'a> {
    /// A matrix whose pixels live in `bytes`, read as native-endian `u32`s.
    ///
    /// Nothing is copied or cleared: existing contents are the initial pixels,
    /// and every write is visible in `bytes` once the matrix is dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferLength`] if the length is not a multiple of 4.
    /// - [`Error::BufferAlignment`] if `bytes` is not 4-byte aligned.
    /// - [`Error::BufferSizeMismatch`] if it does not hold exactly
    ///   `width * height` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn from_buffer(
        bytes: &'a mut [u8],
        width: usize,
        height: usize,
        options: MatrixOptions,
    ) -> Result<Self> {
        let pixels = pixels_from_bytes(bytes)?;
        Self::from_pixels(pixels, width, height, options)
    }

    /// A matrix that uses `pixels` as its storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] unless `pixels.len() == width * height`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn from_pixels(
        pixels: &'a mut [u32],
        width: usize,
        height: usize,
        options: MatrixOptions,
    ) -> Result<Self> {
        let layout = MatrixLayout::new(width, height, options);
        if pixels.len() != layout.len() {
            return Err(Error::BufferSizeMismatch {
                width,
                height,
                expected: layout.len(),
                actual: pixels.len(),
            });
        }
        debug!("PixelMatrix::from_pixels: {}x{} borrowed", width, height);
        Ok(Self {
            layout,
            pixels: PixelBuffer::Borrowed(pixels),
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.layout.width()
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.layout.height()
    }

    /// Wiring flags.
    #[must_use]
    pub const fn options(&self) -> MatrixOptions {
        self.layout.options()
    }

    /// The addressing transform.
    #[must_use]
    pub const fn layout(&self) -> &MatrixLayout {
        &self.layout
    }

    /// Total number of pixels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layout.len()
    }

    /// Whether the matrix has no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Whether the pixels live in caller memory.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        self.pixels.is_borrowed()
    }

    /// The storage itself, to tell owned from borrowed pixels.
    #[must_use]
    pub const fn pixels(&self) -> &PixelBuffer<'a> {
        &self.pixels
    }

    /// See [`MatrixLayout::is_out_of_bounds`].
    #[must_use]
    pub fn is_out_of_bounds(&self, point: Point) -> bool {
        self.layout.is_out_of_bounds(point)
    }

    /// See [`MatrixLayout::index_of`].
    #[must_use]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.layout.index_of(point)
    }

    /// See [`MatrixLayout::coord_of`].
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<Point> {
        self.layout.coord_of(index)
    }

    /// The color at `point`, opaque black when out of bounds.
    #[must_use]
    pub fn color_at(&self, point: Point) -> Color {
        self.layout
            .index_of(point)
            .and_then(|index| self.pixels.get(index))
            .map_or(Color::BLACK, |&packed| Color::from_u32(packed))
    }

    /// Blend `color` over the pixel at `point`. Out of bounds does nothing.
    pub fn set_color(&mut self, point: Point, color: Color) {
        self.blend_at(point, color, f32::from(color.a) / 255.0);
    }

    fn blend_at(&mut self, point: Point, color: Color, opacity: f32) {
        let Some(index) = self.layout.index_of(point) else {
            return;
        };
        if let Some(packed) = self.pixels.get_mut(index) {
            *packed = Color::blend_with_opacity(Color::from_u32(*packed), color, opacity).to_u32();
        }
    }

    /// Blend opaque black over everything.
    pub fn clear(&mut self) {
        self.fill_color(Color::BLACK);
    }

    /// Blend `color` over every pixel.
    pub fn fill_color(&mut self, color: Color) {
        for packed in self.pixels.iter_mut() {
            *packed = Color::blend(Color::from_u32(*packed), color).to_u32();
        }
    }

    /// Stamp `color` through a weight mask.
    ///
    /// `gray_scale[y][x]` is the intensity for mask cell `(x, y)`; rows may have
    /// different lengths. Only cells with a positive weight, and whose mask
    /// row/column index is below the matrix height/width, are painted. Each one
    /// blends `color` onto `(x + x_offset, y + y_offset)` with opacity
    /// `weight * color.a / 255`, capped at fully opaque and kept fractional, so
    /// each channel is rounded once. Targets that land off the panel are
    /// clipped, so stamps can hang over an edge.
    pub fn set_matrix<R: AsRef<[f32]>>(
        &mut self,
        gray_scale: &[R],
        color: Color,
        stamp_options: StampOptions,
    ) {
        let x_offset = stamp_options.x_offset as f32;
        let y_offset = stamp_options.y_offset as f32;
        let mut painted = 0_usize;
        for (y_index, row) in gray_scale.iter().take(self.height()).enumerate() {
            for (x_index, &weight) in row.as_ref().iter().take(self.width()).enumerate() {
                if weight > 0.0 {
                    let target = Point::new(x_index as f32 + x_offset, y_index as f32 + y_offset);
                    let opacity = (weight * f32::from(color.a) / 255.0).min(1.0);
                    self.blend_at(target, color, opacity);
                    painted = painted.saturating_add(1);
                }
            }
        }
        trace!(
            "PixelMatrix::set_matrix: {} weighted cells at ({}, {})",
            painted,
            stamp_options.x_offset,
            stamp_options.y_offset
        );
    }

    /// The live packed buffer in storage order. Not a copy.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable access to the packed buffer, for writing `0x00RRGGBB` values
    /// directly in storage order.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Every stored pixel in storage order, with its logical coordinate.
    pub fn storage_order(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.pixels.iter().enumerate().filter_map(|(index, &packed)| {
            let point = self.layout.coord_of(index)?;
            Some((point, Color::from_u32(packed)))
        })
    }

    /// Colors in wire order, for handing to a `smart_leds::SmartLedsWrite` driver.
    pub fn strip_colors(&self) -> impl Iterator<Item = RGB8> + '_ {
        self.pixels
            .iter()
            .map(|&packed| Color::from_u32(packed).to_rgb8())
    }
}

impl OriginDimensions for PixelMatrix<'_> {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl DrawTarget for PixelMatrix<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_color(coord.into(), color.into());
        }
        Ok(())
    }
}
