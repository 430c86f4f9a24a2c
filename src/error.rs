//! Crate-wide error type.

use alloc::string::String;

use derive_more::{Display, Error};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned by color parsing and matrix construction.
///
/// Out-of-bound coordinates are never an error: writes are clipped and reads
/// return opaque black.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A color string was not `#RRGGBB` or `#RRGGBBAA`.
    #[display("invalid hex color {input:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidHexColor {
        /// The rejected input.
        input: String,
    },
    /// A byte buffer's length is not a whole number of 32-bit pixels.
    #[display("pixel byte buffer length {len} is not a multiple of 4")]
    BufferLength {
        /// Length of the rejected buffer in bytes.
        len: usize,
    },
    /// A byte buffer does not start on a 4-byte boundary.
    #[display("pixel byte buffer is not aligned to 4 bytes")]
    BufferAlignment,
    /// A supplied buffer holds a different number of pixels than the matrix needs.
    #[display("buffer holds {actual} pixels but a {width}x{height} matrix needs {expected}")]
    BufferSizeMismatch {
        /// Requested matrix width.
        width: usize,
        /// Requested matrix height.
        height: usize,
        /// `width * height`.
        expected: usize,
        /// Pixels actually supplied.
        actual: usize,
    },
    /// Serializing a value into the caller's buffer failed (usually too small).
    #[display("failed to serialize value")]
    FormatError,
    /// Stored bytes could not be decoded.
    #[display("stored bytes are corrupted")]
    StorageCorrupted,
}
