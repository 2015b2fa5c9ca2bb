//! Decoding any [`SourceFormat`] into canonical RGBA.

use alloc::vec;

use crate::buffer::{CanonicalImage, PixelBuffer};
use crate::error::{ConvertError, Result};
use crate::format::SourceFormat;
use crate::rows;

/// Decode `height` rows of `width` pixels, `bytes_per_row` apart, into
/// tightly packed RGBA.
///
/// | format | R | G | B | A |
/// |---|---|---|---|---|
/// | RGB | b0 | b1 | b2 | 255 |
/// | BGR | b2 | b1 | b0 | 255 |
/// | ARGB | b1 | b2 | b3 | b0 |
/// | ABGR | b3 | b2 | b1 | b0 |
/// | BGRA | b2 | b1 | b0 | b3 |
/// | RGBA | b0 | b1 | b2 | b3 |
/// | GRAYSCALE | b0 | b0 | b0 | 255 |
///
/// `data` must hold at least `bytes_per_row * height` bytes and each row
/// must fit its pixels; otherwise [`ConvertError::InvalidArgument`].
///
/// ```
/// use pixcanon::{SourceFormat, normalize_to_rgba};
///
/// let img = normalize_to_rgba(&[128], 1, 1, 1, SourceFormat::Grayscale)?;
/// assert_eq!(img.as_bytes(), [128, 128, 128, 255]);
/// # Ok::<(), pixcanon::ConvertError>(())
/// ```
pub fn normalize_to_rgba(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_row: usize,
    format: SourceFormat,
) -> Result<CanonicalImage> {
    let source = PixelBuffer::new(data, width, height, bytes_per_row, format)?;
    normalize_buffer(&source)
}

/// [`normalize_to_rgba`] for a format given by its tag (`"BGR"`, ...).
///
/// Dimension and length checks run before the tag is looked up, so a bad
/// buffer reports [`ConvertError::InvalidArgument`] whatever the tag.
pub fn normalize_tagged(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_row: usize,
    format_tag: &str,
) -> Result<CanonicalImage> {
    // Grayscale has the narrowest rows, so this only checks what every
    // format shares; the full check happens once the tag is known.
    PixelBuffer::new(data, width, height, bytes_per_row, SourceFormat::Grayscale)?;
    let format: SourceFormat = format_tag.parse()?;
    normalize_to_rgba(data, width, height, bytes_per_row, format)
}

/// Decode an already validated view.
pub fn normalize_buffer(source: &PixelBuffer<'_>) -> Result<CanonicalImage> {
    let (w, h, ss) = (source.width(), source.height(), source.stride());
    let ds = w
        .checked_mul(CanonicalImage::BYTES_PER_PIXEL)
        .ok_or(ConvertError::InvalidArgument("width * 4 overflows"))?;
    let len = ds
        .checked_mul(h)
        .ok_or(ConvertError::InvalidArgument("width * height * 4 overflows"))?;
    let mut out = vec![0u8; len];
    decode_rows(source.data(), &mut out, w, h, ss, ds, source.format())?;
    Ok(CanonicalImage::from_parts(out, w, h))
}

/// Decode `height` rows from `src` into RGBA rows `dst_stride` apart in `dst`.
pub(crate) fn decode_rows(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    format: SourceFormat,
) -> Result<()> {
    let (w, h, ss, ds) = (width, height, src_stride, dst_stride);
    match format {
        SourceFormat::Rgba => rows::copy_strided(src, dst, w, h, ss, ds, 4),
        SourceFormat::Grayscale => rows::gray_to_rgba_strided(src, dst, w, h, ss, ds),
        f => match (f.rgba_order(), f.rgb_order()) {
            (Some(order), _) => rows::shuffle4_strided(src, dst, w, h, ss, ds, order),
            (None, Some(order)) => rows::expand3_strided(src, dst, w, h, ss, ds, order),
            (None, None) => Err(ConvertError::UnsupportedFormat(f.name().into())),
        },
    }
}
