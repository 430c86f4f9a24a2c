//! Panel geometry and wiring: how a logical `(x, y)` maps to a position in the
//! flat pixel buffer, and back.
//!
//! See [`MatrixLayout`] for the addressing rules and [`MatrixOptions`] for the
//! wiring flags.

use embedded_graphics::geometry::Point as GraphicsPoint;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A logical coordinate on the panel.
///
/// `(0, 0)` is the top-left corner, `x` increases to the right and `y` downward.
/// Points are not bounds-checked; [`MatrixLayout::is_out_of_bounds`] decides
/// validity. Fractional coordinates are floored when addressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    /// Column.
    pub x: f32,
    /// Row.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

impl From<(usize, usize)> for Point {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

impl From<GraphicsPoint> for Point {
    fn from(point: GraphicsPoint) -> Self {
        Self::from((point.x, point.y))
    }
}

/// Wiring flags for a panel. All default to `false`.
///
/// Options are the panel's configuration and can be persisted with
/// [`Self::to_slice`] / [`Self::from_bytes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixOptions {
    /// Reflect `x` before addressing (panel mounted left-right reversed).
    pub x_mirrored: bool,
    /// Reflect `y` before addressing (panel mounted upside down).
    pub y_mirrored: bool,
    /// Serpentine column wiring: even columns run bottom-to-top.
    pub zigzag: bool,
}

impl MatrixOptions {
    /// Upper bound on the encoded size of a `MatrixOptions`.
    pub const MAX_ENCODED_LEN: usize = 3;

    /// Serpentine wiring with no mirroring.
    #[must_use]
    pub const fn zigzag() -> Self {
        Self {
            x_mirrored: false,
            y_mirrored: false,
            zigzag: true,
        }
    }

    /// Encode with `postcard` into `buffer`, returning the used prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormatError`] if `buffer` is too small
    /// (see [`Self::MAX_ENCODED_LEN`]).
    pub fn to_slice<'buf>(&self, buffer: &'buf mut [u8]) -> Result<&'buf mut [u8]> {
        postcard::to_slice(self, buffer).map_err(|_| Error::FormatError)
    }

    /// Decode options written by [`Self::to_slice`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageCorrupted`] if `bytes` do not decode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(|_| Error::StorageCorrupted)
    }
}

/// Dimensions plus wiring: the bidirectional `(x, y)` ↔ buffer-index transform.
///
/// The buffer is column-major: index `x * height + y` holds `(x, y)` on a
/// plain panel. The options adjust that:
///
/// - `x_mirrored` / `y_mirrored` reflect the whole axis first.
/// - `zigzag` reverses every even column (counted after mirroring), which models
///   a strip that snakes up one column and down the next.
///
/// ```text
/// 3×2, zigzag (LED index at each (x, y)):
///   LED1  LED2  LED5
///   LED0  LED3  LED4
/// ```
///
/// [`Self::index_of`] and [`Self::coord_of`] each apply their own corrections
/// in their own order rather than one being derived from the other. For
/// integer in-bound points they agree; a fractional point is floored on the
/// way in, so it does not come back unchanged.
///
/// # Example
///
/// ```rust
/// use pixel_matrix::{MatrixLayout, MatrixOptions, Point};
///
/// const LAYOUT: MatrixLayout = MatrixLayout::new(4, 4, MatrixOptions::zigzag());
///
/// assert_eq!(LAYOUT.index_of(Point::new(0.0, 0.0)), Some(3));
/// assert_eq!(LAYOUT.index_of(Point::new(1.0, 0.0)), Some(4));
/// assert_eq!(LAYOUT.coord_of(3), Some(Point::new(0.0, 0.0)));
/// assert_eq!(LAYOUT.index_of(Point::new(4.0, 0.0)), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixLayout {
    width: usize,
    height: usize,
    options: MatrixOptions,
}

impl MatrixLayout {
    /// Describe a `width × height` panel.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    #[must_use]
    pub const fn new(width: usize, height: usize, options: MatrixOptions) -> Self {
        assert!(
            width.checked_mul(height).is_some(),
            "width * height must fit in usize"
        );
        Self {
            width,
            height,
            options,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Wiring flags.
    #[must_use]
    pub const fn options(&self) -> MatrixOptions {
        self.options
    }

    /// Total number of pixels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the panel has no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `point` lies outside `0..width` × `0..height`.
    ///
    /// Checked on the raw point, before flooring or mirroring. NaN coordinates
    /// are out of bounds.
    #[must_use]
    pub fn is_out_of_bounds(&self, point: Point) -> bool {
        let inside_x = point.x >= 0.0 && point.x < self.width as f32;
        let inside_y = point.y >= 0.0 && point.y < self.height as f32;
        !(inside_x && inside_y)
    }

    /// Buffer index for a logical point, or `None` when out of bounds.
    #[must_use]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        if self.is_out_of_bounds(point) {
            return None;
        }
        // Non-negative here, so truncation is floor.
        let mut x = point.x as usize;
        let mut y = point.y as usize;
        if self.options.x_mirrored {
            x = self.width - x - 1;
        }
        if self.options.y_mirrored {
            y = self.height - y - 1;
        }
        let row = if self.options.zigzag && x % 2 == 0 {
            self.height - 1 - y
        } else {
            y
        };
        Some(x * self.height + row)
    }

    /// Logical point stored at a buffer index, or `None` past the end.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<Point> {
        if index >= self.len() {
            return None;
        }
        let mut x = index / self.height;
        let mut y = index % self.height;
        if self.options.zigzag && x % 2 == 0 {
            y = self.height - 1 - y;
        }
        if self.options.y_mirrored {
            y = self.height - 1 - y;
        }
        if self.options.x_mirrored {
            x = self.width - 1 - x;
        }
        Some(Point::from((x, y)))
    }
}
