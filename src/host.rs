//! Entry points for a host runtime.
//!
//! These take what a foreign caller naturally has: signed 32-bit dimensions,
//! format tags as strings, layouts and weights as plain arrays, and surfaces
//! behind [`PixelSurface`]. Everything is validated here and then handed to
//! the typed core.

use alloc::vec::Vec;

use crate::buffer::{CanonicalImage, PixelBuffer};
use crate::error::{ConvertError, Result};
use crate::format::{ChannelLayout, GrayWeights, SourceFormat};
use crate::gray::to_grayscale;
use crate::normalize::normalize_tagged;
use crate::remap::remap_channels;
use crate::rows;
use crate::surface::{PixelSurface, SurfaceAllocator, SurfaceFormat, SurfaceInfo, SurfaceLock, unavailable};

fn dimension(value: i32) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or(ConvertError::InvalidArgument(
            "width, height and bytes per row must be greater than 0",
        ))
}

fn rgba_info<S: PixelSurface + ?Sized>(surface: &S) -> Result<SurfaceInfo> {
    let info = surface.info()?;
    if info.format != SurfaceFormat::Rgba8888 {
        trace!(format = %info.format, "surface rejected");
        return Err(ConvertError::InvalidArgument("surface format must be RGBA_8888"));
    }
    Ok(info)
}

/// Run `f` over the locked RGBA pixels of `surface`.
fn with_rgba_pixels<S, T>(surface: &mut S, f: impl FnOnce(&PixelBuffer<'_>) -> Result<T>) -> Result<T>
where
    S: PixelSurface + ?Sized,
{
    let info = rgba_info(surface)?;
    let lock = SurfaceLock::acquire(surface)?;
    let source = PixelBuffer::new_trailing(lock.pixels()?, info.width, info.height, info.stride, SourceFormat::Rgba)?;
    f(&source)
}

/// Remap the channels of an `RGBA_8888` surface.
///
/// The layout is checked before the surface is touched. The surface is
/// locked for the duration of the read and unlocked on every path.
pub fn remap_surface_channels<S: PixelSurface + ?Sized>(surface: &mut S, layout: &[i32]) -> Result<Vec<u8>> {
    let layout = ChannelLayout::from_i32s(layout)?;
    with_rgba_pixels(surface, |source| remap_channels(source, &layout))
}

/// Reduce an `RGBA_8888` surface to one byte per pixel.
pub fn surface_to_grayscale<S: PixelSurface + ?Sized>(surface: &mut S, weights: &[f32]) -> Result<Vec<u8>> {
    let weights = GrayWeights::from_slice(weights)?;
    with_rgba_pixels(surface, |source| to_grayscale(source, &weights))
}

/// Decode host pixels into tightly packed RGBA bytes.
pub fn normalize_to_rgba_bytes(
    data: &[u8],
    width: i32,
    height: i32,
    bytes_per_row: i32,
    format_tag: &str,
) -> Result<Vec<u8>> {
    let (w, h, bpr) = (dimension(width)?, dimension(height)?, dimension(bytes_per_row)?);
    normalize_tagged(data, w, h, bpr, format_tag).map(CanonicalImage::into_vec)
}

/// Copy a canonical image into a new surface from `allocator`.
///
/// Rows are written at the surface's own stride, so padded surfaces are
/// fine. Allocation, an unusable surface, or a failed lock all report
/// [`ConvertError::ResourceUnavailable`].
pub fn package_as_image<A: SurfaceAllocator + ?Sized>(
    allocator: &mut A,
    image: &CanonicalImage,
) -> Result<A::Surface> {
    let (w, h) = (image.width(), image.height());
    let mut surface = allocator
        .allocate(w, h)
        .map_err(|err| unavailable(err, "surface allocation failed"))?;
    let info = surface.info().map_err(|err| unavailable(err, "allocated surface has no geometry"))?;
    if info.format != SurfaceFormat::Rgba8888 || info.width < w || info.height < h {
        trace!(format = %info.format, width = info.width, height = info.height, "allocated surface cannot hold image");
        return Err(ConvertError::ResourceUnavailable("allocated surface cannot hold the image"));
    }
    {
        let mut lock = SurfaceLock::acquire(&mut surface)?;
        let pixels = lock.pixels_mut()?;
        rows::copy_strided(image.as_bytes(), pixels, w, h, image.stride(), info.stride, 4)
            .map_err(|err| unavailable(err, "surface pixel storage is too small"))?;
    }
    trace!(width = w, height = h, "packaged canonical image");
    Ok(surface)
}

/// Decode host pixels and package them into a new `RGBA_8888` surface.
pub fn convert_to_image<A: SurfaceAllocator + ?Sized>(
    allocator: &mut A,
    data: &[u8],
    width: i32,
    height: i32,
    bytes_per_row: i32,
    format_tag: &str,
) -> Result<A::Surface> {
    let (w, h, bpr) = (dimension(width)?, dimension(height)?, dimension(bytes_per_row)?);
    let canonical = normalize_tagged(data, w, h, bpr, format_tag)?;
    package_as_image(allocator, &canonical)
}
