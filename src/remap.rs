//! Channel remapping: RGBA in, any 3- or 4-channel selection out.

use alloc::vec;
use alloc::vec::Vec;

use crate::buffer::PixelBuffer;
use crate::error::{ConvertError, Result};
use crate::format::ChannelLayout;
use crate::rows;

/// Reorder or subset the channels of an RGBA buffer.
///
/// For every pixel, in row-major order, appends `rgba[i]` for each index `i`
/// of `layout`. The result holds `width * height * layout.len()` bytes and is
/// tightly packed. Source padding is never read.
///
/// ```
/// use pixcanon::{ChannelLayout, PixelBuffer, SourceFormat, remap_channels};
///
/// let rgba = [10u8, 20, 30, 40];
/// let src = PixelBuffer::new(&rgba, 1, 1, 4, SourceFormat::Rgba)?;
/// assert_eq!(remap_channels(&src, &ChannelLayout::BGR)?, [30, 20, 10]);
/// assert_eq!(remap_channels(&src, &ChannelLayout::ARGB)?, [40, 10, 20, 30]);
/// # Ok::<(), pixcanon::ConvertError>(())
/// ```
pub fn remap_channels(source: &PixelBuffer<'_>, layout: &ChannelLayout) -> Result<Vec<u8>> {
    source.require_rgba()?;
    let (w, h) = (source.width(), source.height());
    let channels = layout.len();
    let out_len = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ConvertError::InvalidArgument("output size overflows"))?;
    let mut out = vec![0u8; out_len];
    let row_out = w * channels;
    match *layout.indices() {
        [a, b, c] => rows::pick3_strided(source.data(), &mut out, w, h, source.stride(), row_out, [a, b, c])?,
        [a, b, c, d] => {
            rows::shuffle4_strided(source.data(), &mut out, w, h, source.stride(), row_out, [a, b, c, d])?
        }
        _ => return Err(ConvertError::InvalidArgument("layout length must be 3 or 4")),
    }
    Ok(out)
}
