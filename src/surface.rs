//! Host capability interface.
//!
//! A native image object (a platform bitmap, a GPU staging buffer, ...) is
//! reached only through [`PixelSurface`]: the converter asks for its geometry,
//! locks it, reads or writes the pixel span, and unlocks it. New surfaces come
//! from a [`SurfaceAllocator`]. [`SurfaceLock`] scopes the lock so the surface
//! is released exactly once on every path.

use core::fmt;

use crate::error::{ConvertError, Result};

/// Storage layout of a host surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// 4 bytes per pixel, R G B A in memory order.
    Rgba8888,
    /// 1 byte per pixel, coverage only.
    Alpha8,
    /// 2 bytes per pixel, packed 5-6-5.
    Rgb565,
    /// 8 bytes per pixel, half-float RGBA.
    RgbaF16,
}

impl SurfaceFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            SurfaceFormat::Rgba8888 => 4,
            SurfaceFormat::Alpha8 => 1,
            SurfaceFormat::Rgb565 => 2,
            SurfaceFormat::RgbaF16 => 8,
        }
    }
}

impl fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SurfaceFormat::Rgba8888 => "RGBA_8888",
            SurfaceFormat::Alpha8 => "ALPHA_8",
            SurfaceFormat::Rgb565 => "RGB_565",
            SurfaceFormat::RgbaF16 => "RGBA_F16",
        })
    }
}

/// Geometry a surface reports before it is locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: usize,
    pub height: usize,
    /// Bytes between the starts of consecutive rows.
    pub stride: usize,
    pub format: SurfaceFormat,
}

/// A lockable block of pixels owned by the host.
///
/// `pixels` and `pixels_mut` are only meaningful between a successful
/// `lock_pixels` and the matching `unlock_pixels`; implementations should
/// fail with [`ConvertError::ResourceUnavailable`] outside that window.
/// Prefer [`SurfaceLock`] over calling the lock methods directly.
pub trait PixelSurface {
    fn info(&self) -> Result<SurfaceInfo>;

    fn lock_pixels(&mut self) -> Result<()>;

    fn pixels(&self) -> Result<&[u8]>;

    fn pixels_mut(&mut self) -> Result<&mut [u8]>;

    /// Release a lock taken by `lock_pixels`. Called exactly once per
    /// successful lock.
    fn unlock_pixels(&mut self);
}

impl<S: PixelSurface + ?Sized> PixelSurface for &mut S {
    fn info(&self) -> Result<SurfaceInfo> {
        (**self).info()
    }

    fn lock_pixels(&mut self) -> Result<()> {
        (**self).lock_pixels()
    }

    fn pixels(&self) -> Result<&[u8]> {
        (**self).pixels()
    }

    fn pixels_mut(&mut self) -> Result<&mut [u8]> {
        (**self).pixels_mut()
    }

    fn unlock_pixels(&mut self) {
        (**self).unlock_pixels()
    }
}

/// Creates `RGBA_8888` surfaces for packaged output.
pub trait SurfaceAllocator {
    type Surface: PixelSurface;

    /// Allocate a `width × height` `RGBA_8888` surface. Failure is
    /// [`ConvertError::ResourceUnavailable`].
    fn allocate(&mut self, width: usize, height: usize) -> Result<Self::Surface>;
}

/// Report any host failure as [`ConvertError::ResourceUnavailable`], keeping
/// the host's own message when it already is one.
pub(crate) fn unavailable(err: ConvertError, fallback: &'static str) -> ConvertError {
    match err {
        ConvertError::ResourceUnavailable(_) => err,
        _ => ConvertError::ResourceUnavailable(fallback),
    }
}

/// Holds a surface locked until dropped.
pub struct SurfaceLock<'s, S: PixelSurface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: PixelSurface + ?Sized> SurfaceLock<'s, S> {
    /// Lock `surface`. A failed lock is reported as
    /// [`ConvertError::ResourceUnavailable`] and leaves nothing to release.
    pub fn acquire(surface: &'s mut S) -> Result<Self> {
        if let Err(err) = surface.lock_pixels() {
            trace!(error = %err, "surface lock failed");
            return Err(unavailable(err, "failed to lock surface pixels"));
        }
        trace!("surface locked");
        Ok(Self { surface })
    }

    pub fn pixels(&self) -> Result<&[u8]> {
        self.surface.pixels()
    }

    pub fn pixels_mut(&mut self) -> Result<&mut [u8]> {
        self.surface.pixels_mut()
    }
}

impl<S: PixelSurface + ?Sized> Drop for SurfaceLock<'_, S> {
    fn drop(&mut self) {
        self.surface.unlock_pixels();
        trace!("surface unlocked");
    }
}
