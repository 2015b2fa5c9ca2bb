//! Owned pixel data tagged with its source format.

use alloc::vec::Vec;

use crate::buffer::{CanonicalImage, PixelBuffer};
use crate::error::{ConvertError, Result};
use crate::format::SourceFormat;
use crate::host::package_as_image;
use crate::normalize::normalize_buffer;
use crate::surface::{PixelSurface, SurfaceAllocator, SurfaceFormat, SurfaceLock};

/// Pixel bytes plus the geometry and format needed to decode them.
///
/// Unlike [`PixelBuffer`], an `Image` owns its storage and can outlive the
/// surface or buffer it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: usize,
    height: usize,
    bytes_per_row: usize,
    format: SourceFormat,
}

impl Image {
    /// Validated the same way as [`PixelBuffer::new`].
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        bytes_per_row: usize,
        format: SourceFormat,
    ) -> Result<Self> {
        PixelBuffer::new(&data, width, height, bytes_per_row, format)?;
        Ok(Self {
            data,
            width,
            height,
            bytes_per_row,
            format,
        })
    }

    /// Copy the pixels out of a host surface.
    ///
    /// `RGBA_8888` surfaces become [`SourceFormat::Rgba`], `ALPHA_8` surfaces
    /// become [`SourceFormat::Grayscale`]; anything else is
    /// [`ConvertError::InvalidArgument`]. The surface is unlocked before
    /// returning.
    pub fn from_surface<S: PixelSurface + ?Sized>(surface: &mut S) -> Result<Self> {
        let info = surface.info()?;
        let format = match info.format {
            SurfaceFormat::Rgba8888 => SourceFormat::Rgba,
            SurfaceFormat::Alpha8 => SourceFormat::Grayscale,
            _ => {
                return Err(ConvertError::InvalidArgument(
                    "only RGBA_8888 or ALPHA_8 surfaces are supported",
                ));
            }
        };
        let len = info
            .stride
            .checked_mul(info.height)
            .ok_or(ConvertError::InvalidArgument("surface size overflows"))?;
        let lock = SurfaceLock::acquire(surface)?;
        let pixels = lock.pixels()?;
        let data = pixels
            .get(..len)
            .ok_or(ConvertError::InvalidArgument("surface pixels are shorter than stride * height"))?
            .to_vec();
        drop(lock);
        Self::new(data, info.width, info.height, info.stride, format)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn as_buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer::validated(&self.data, self.width, self.height, self.bytes_per_row, self.format)
    }

    /// Decode to canonical RGBA.
    pub fn to_canonical(&self) -> Result<CanonicalImage> {
        normalize_buffer(&self.as_buffer())
    }

    /// Decode and package into a freshly allocated surface.
    pub fn to_surface<A: SurfaceAllocator + ?Sized>(&self, allocator: &mut A) -> Result<A::Surface> {
        package_as_image(allocator, &self.to_canonical()?)
    }
}
