//! Borrowed source views and the owned canonical RGBA output.

use alloc::vec::Vec;

use crate::error::{ConvertError, Result};
use crate::format::SourceFormat;

/// Bytes needed for `height` rows of `row_bytes` each, `stride` apart.
///
/// The last row only needs `row_bytes`; padding after it is optional.
#[inline]
pub(crate) fn strided_len(row_bytes: usize, height: usize, stride: usize) -> Option<usize> {
    (height - 1).checked_mul(stride)?.checked_add(row_bytes)
}

// ---------------------------------------------------------------------------
// PixelBuffer
// ---------------------------------------------------------------------------

/// A read-only, strided view over a caller-owned pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: SourceFormat,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as `height` rows of `width` pixels, `stride` bytes apart.
    ///
    /// Fails with [`ConvertError::InvalidArgument`] when any dimension is zero,
    /// when `stride` cannot hold a row, or when `data` is shorter than
    /// `stride * height`.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: SourceFormat,
    ) -> Result<Self> {
        check_dimensions(data, width, height, stride)?;
        let total = stride
            .checked_mul(height)
            .ok_or(ConvertError::InvalidArgument("stride * height overflows"))?;
        if data.len() < total {
            return Err(ConvertError::InvalidArgument(
                "image data is shorter than bytes per row * height",
            ));
        }
        Self::with_min_stride(data, width, height, stride, format)
    }

    /// Like [`PixelBuffer::new`], but the final row may stop right after its
    /// last pixel instead of carrying full-stride padding.
    pub(crate) fn new_trailing(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: SourceFormat,
    ) -> Result<Self> {
        check_dimensions(data, width, height, stride)?;
        let row_bytes = row_bytes(width, format)?;
        let total = strided_len(row_bytes, height, stride)
            .ok_or(ConvertError::InvalidArgument("stride * height overflows"))?;
        if data.len() < total {
            return Err(ConvertError::InvalidArgument("image data is too short for its dimensions"));
        }
        Self::with_min_stride(data, width, height, stride, format)
    }

    /// Skip validation for geometry already checked by an owner.
    pub(crate) fn validated(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: SourceFormat,
    ) -> Self {
        debug_assert!(Self::new_trailing(data, width, height, stride, format).is_ok());
        Self {
            data,
            width,
            height,
            stride,
            format,
        }
    }

    fn with_min_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: SourceFormat,
    ) -> Result<Self> {
        if row_bytes(width, format)? > stride {
            return Err(ConvertError::InvalidArgument(
                "bytes per row is smaller than width * bytes per pixel",
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance in bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// The whole underlying span, padding included.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel bytes of each row, padding excluded.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + use<'a> {
        let row_bytes = self.width * self.format.bytes_per_pixel();
        let (data, stride) = (self.data, self.stride);
        (0..self.height).map(move |y| &data[y * stride..][..row_bytes])
    }

    pub(crate) fn require_rgba(&self) -> Result<()> {
        if self.format == SourceFormat::Rgba {
            Ok(())
        } else {
            Err(ConvertError::InvalidArgument("source format must be RGBA"))
        }
    }
}

fn check_dimensions(data: &[u8], width: usize, height: usize, stride: usize) -> Result<()> {
    if data.is_empty() || width == 0 || height == 0 || stride == 0 {
        return Err(ConvertError::InvalidArgument(
            "image data must not be empty and width, height and bytes per row must be greater than 0",
        ));
    }
    Ok(())
}

fn row_bytes(width: usize, format: SourceFormat) -> Result<usize> {
    width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(ConvertError::InvalidArgument("width * bytes per pixel overflows"))
}

// ---------------------------------------------------------------------------
// CanonicalImage
// ---------------------------------------------------------------------------

/// Tightly packed RGBA, 4 bytes per pixel, `width * 4` bytes per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl CanonicalImage {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Adopt an RGBA buffer. `data` must be exactly `width * height * 4` bytes.
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidArgument("width and height must be greater than 0"));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(Self::BYTES_PER_PIXEL))
            .ok_or(ConvertError::InvalidArgument("width * height * 4 overflows"))?;
        if data.len() != expected {
            return Err(ConvertError::InvalidArgument(
                "canonical data must be exactly width * height * 4 bytes",
            ));
        }
        Ok(Self { data, width, height })
    }

    /// Caller guarantees `data.len() == width * height * 4`.
    pub(crate) fn from_parts(data: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height * Self::BYTES_PER_PIXEL);
        Self { data, width, height }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Always `width * 4`.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * Self::BYTES_PER_PIXEL
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn rows(&self) -> core::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.stride())
    }

    /// View this image as an RGBA [`PixelBuffer`], e.g. to remap it.
    pub fn as_pixel_buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride(),
            format: SourceFormat::Rgba,
        }
    }
}

impl AsRef<[u8]> for CanonicalImage {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<CanonicalImage> for Vec<u8> {
    fn from(img: CanonicalImage) -> Self {
        img.data
    }
}
