//! In-memory [`PixelSurface`] for callers without a native host.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ConvertError, Result};
use crate::surface::{PixelSurface, SurfaceAllocator, SurfaceFormat, SurfaceInfo};

/// A heap-backed bitmap with an exclusive lock flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
    format: SurfaceFormat,
    locked: bool,
}

impl Bitmap {
    /// A zeroed, tightly packed bitmap.
    pub fn new(width: usize, height: usize, format: SurfaceFormat) -> Result<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ConvertError::InvalidArgument("bitmap row size overflows"))?;
        Self::with_stride(width, height, stride, format)
    }

    /// A zeroed bitmap whose rows are `stride` bytes apart.
    pub fn with_stride(width: usize, height: usize, stride: usize, format: SurfaceFormat) -> Result<Self> {
        let len = stride
            .checked_mul(height)
            .ok_or(ConvertError::InvalidArgument("bitmap size overflows"))?;
        Self::from_pixels(vec![0; len], width, height, stride, format)
    }

    /// Wrap existing pixel storage. `data` must hold `stride * height` bytes.
    pub fn from_pixels(
        data: Vec<u8>,
        width: usize,
        height: usize,
        stride: usize,
        format: SurfaceFormat,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidArgument("bitmap dimensions must be greater than 0"));
        }
        let row = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ConvertError::InvalidArgument("bitmap row size overflows"))?;
        if stride < row {
            return Err(ConvertError::InvalidArgument("bitmap stride is smaller than a row"));
        }
        if stride.checked_mul(height) != Some(data.len()) {
            return Err(ConvertError::InvalidArgument("bitmap storage must be stride * height bytes"));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
            locked: false,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Raw storage, padding included, regardless of the lock.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.data
    }
}

impl PixelSurface for Bitmap {
    fn info(&self) -> Result<SurfaceInfo> {
        Ok(SurfaceInfo {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        })
    }

    fn lock_pixels(&mut self) -> Result<()> {
        if self.locked {
            return Err(ConvertError::ResourceUnavailable("bitmap is already locked"));
        }
        self.locked = true;
        Ok(())
    }

    fn pixels(&self) -> Result<&[u8]> {
        if !self.locked {
            return Err(ConvertError::ResourceUnavailable("bitmap is not locked"));
        }
        Ok(&self.data)
    }

    fn pixels_mut(&mut self) -> Result<&mut [u8]> {
        if !self.locked {
            return Err(ConvertError::ResourceUnavailable("bitmap is not locked"));
        }
        Ok(&mut self.data)
    }

    fn unlock_pixels(&mut self) {
        self.locked = false;
    }
}

/// Hands out [`Bitmap`]s in `RGBA_8888`.
#[derive(Clone, Debug, Default)]
pub struct BitmapAllocator {
    row_padding: usize,
    byte_limit: Option<usize>,
}

impl BitmapAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `padding` bytes to the end of every allocated row.
    pub fn with_row_padding(mut self, padding: usize) -> Self {
        self.row_padding = padding;
        self
    }

    /// Refuse allocations larger than `limit` bytes.
    pub fn with_byte_limit(mut self, limit: usize) -> Self {
        self.byte_limit = Some(limit);
        self
    }
}

impl SurfaceAllocator for BitmapAllocator {
    type Surface = Bitmap;

    fn allocate(&mut self, width: usize, height: usize) -> Result<Bitmap> {
        let unavailable = ConvertError::ResourceUnavailable("bitmap allocation failed");
        let stride = width
            .checked_mul(4)
            .and_then(|row| row.checked_add(self.row_padding))
            .ok_or(unavailable.clone())?;
        let len = stride.checked_mul(height).ok_or(unavailable.clone())?;
        if self.byte_limit.is_some_and(|limit| len > limit) {
            trace!(width, height, len, "bitmap allocation over limit");
            return Err(unavailable);
        }
        trace!(width, height, stride, "bitmap allocated");
        Bitmap::with_stride(width, height, stride, SurfaceFormat::Rgba8888).map_err(|_| unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_need_a_lock() {
        let mut bitmap = Bitmap::new(2, 1, SurfaceFormat::Rgba8888).unwrap();
        assert!(bitmap.pixels().unwrap_err().is_resource_unavailable());
        bitmap.lock_pixels().unwrap();
        assert_eq!(bitmap.pixels().unwrap(), [0; 8]);
        assert!(bitmap.lock_pixels().unwrap_err().is_resource_unavailable());
        bitmap.unlock_pixels();
        assert!(bitmap.pixels_mut().is_err());
    }

    #[test]
    fn from_pixels_validates_storage() {
        assert!(Bitmap::from_pixels(vec![0; 8], 2, 1, 8, SurfaceFormat::Rgba8888).is_ok());
        assert!(Bitmap::from_pixels(vec![0; 7], 2, 1, 8, SurfaceFormat::Rgba8888).is_err());
        assert!(Bitmap::from_pixels(vec![0; 6], 2, 1, 6, SurfaceFormat::Rgba8888).is_err());
        assert!(Bitmap::from_pixels(vec![], 0, 1, 4, SurfaceFormat::Rgba8888).is_err());
    }

    #[test]
    fn allocator_pads_rows_and_honours_limit() {
        let mut allocator = BitmapAllocator::new().with_row_padding(4);
        let bitmap = allocator.allocate(3, 2).unwrap();
        assert_eq!(bitmap.stride(), 16);
        assert_eq!(bitmap.format(), SurfaceFormat::Rgba8888);
        assert_eq!(bitmap.as_bytes().len(), 32);

        let mut allocator = BitmapAllocator::new().with_byte_limit(15);
        assert!(allocator.allocate(2, 2).unwrap_err().is_resource_unavailable());
        assert!(allocator.allocate(0, 2).unwrap_err().is_resource_unavailable());
        assert!(allocator.allocate(usize::MAX, 2).unwrap_err().is_resource_unavailable());
    }
}
