//! Storage behind a [`PixelMatrix`](crate::PixelMatrix): owned, or borrowed
//! from the caller.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use crate::{Error, Result};

/// Packed `0x00RRGGBB` pixels in storage (wire) order.
///
/// `Borrowed` aliases memory the caller owns: writes through the matrix land
/// in the caller's buffer, and the borrow keeps the caller from touching it
/// until the matrix is dropped.
#[derive(Debug, PartialEq, Eq)]
pub enum PixelBuffer<'a> {
    /// Allocated and owned by the matrix.
    Owned(Vec<u32>),
    /// A view over caller memory.
    Borrowed(&'a mut [u32]),
}

impl PixelBuffer<'_> {
    /// An owned buffer of `len` black pixels.
    #[must_use]
    pub fn black(len: usize) -> Self {
        Self::Owned(vec![0; len])
    }

    /// Whether this buffer aliases caller memory.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }
}

impl Deref for PixelBuffer<'_> {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(pixels) => pixels,
            Self::Borrowed(pixels) => pixels,
        }
    }
}

impl DerefMut for PixelBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Owned(pixels) => pixels,
            Self::Borrowed(pixels) => pixels,
        }
    }
}

/// Reinterpret raw bytes as native-endian `u32` pixels without copying.
///
/// Length is checked before alignment so a short buffer reports the more
/// useful error.
pub(crate) fn pixels_from_bytes(bytes: &mut [u8]) -> Result<&mut [u32]> {
    let len = bytes.len();
    if len % size_of::<u32>() != 0 {
        return Err(Error::BufferLength { len });
    }
    bytemuck::try_cast_slice_mut(bytes).map_err(|_| Error::BufferAlignment)
}
