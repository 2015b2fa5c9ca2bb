//! Weighted RGB → grayscale reduction.

use alloc::vec;
use alloc::vec::Vec;

use crate::buffer::PixelBuffer;
use crate::error::{ConvertError, Result};
use crate::format::GrayWeights;
use crate::rows;

/// Reduce an RGBA buffer to one byte per pixel.
///
/// Each output byte is `clamp(trunc(r*w.r + g*w.g + b*w.b), 0, 255)` computed
/// in `f32`. The sum is truncated, not rounded, before clamping; alpha is
/// ignored. Output is `width * height` bytes, row-major, no padding.
///
/// ```
/// use pixcanon::{GrayWeights, PixelBuffer, SourceFormat, to_grayscale};
///
/// let rgba = [200u8, 100, 50, 0];
/// let src = PixelBuffer::new(&rgba, 1, 1, 4, SourceFormat::Rgba)?;
/// assert_eq!(to_grayscale(&src, &GrayWeights::new(1.0, 0.0, 0.0))?, [200]);
/// # Ok::<(), pixcanon::ConvertError>(())
/// ```
pub fn to_grayscale(source: &PixelBuffer<'_>, weights: &GrayWeights) -> Result<Vec<u8>> {
    source.require_rgba()?;
    let (w, h) = (source.width(), source.height());
    let n = w
        .checked_mul(h)
        .ok_or(ConvertError::InvalidArgument("output size overflows"))?;
    let mut out = vec![0u8; n];
    rows::luma_strided(
        source.data(),
        &mut out,
        w,
        h,
        source.stride(),
        [weights.r, weights.g, weights.b],
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SourceFormat;

    fn sample() -> Vec<u8> {
        (0..6 * 4 * 4).map(|i| (i * 7 % 256) as u8).collect()
    }

    #[test]
    fn unit_red_weight_reproduces_red() {
        let data = sample();
        let src = PixelBuffer::new(&data, 6, 4, 24, SourceFormat::Rgba).unwrap();
        let out = to_grayscale(&src, &GrayWeights::new(1.0, 0.0, 0.0)).unwrap();
        let reds: Vec<u8> = data.chunks_exact(4).map(|px| px[0]).collect();
        assert_eq!(out, reds);
    }

    #[test]
    fn zero_weights_give_black() {
        let data = sample();
        let src = PixelBuffer::new(&data, 6, 4, 24, SourceFormat::Rgba).unwrap();
        let out = to_grayscale(&src, &GrayWeights::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(out.len(), 24);
        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn default_weights_truncate() {
        // 0.2989*255 + 0.587*255 + 0.114*255 = 254.97... truncates to 254
        let data = [255u8, 255, 255, 255, 100, 100, 100, 0];
        let src = PixelBuffer::new(&data, 2, 1, 8, SourceFormat::Rgba).unwrap();
        let out = to_grayscale(&src, &GrayWeights::default()).unwrap();
        assert_eq!(out, [254, 99]);
    }

    #[test]
    fn oversized_weights_saturate() {
        let data = [200u8, 200, 200, 0, 1, 0, 0, 0];
        let src = PixelBuffer::new(&data, 2, 1, 8, SourceFormat::Rgba).unwrap();
        let out = to_grayscale(&src, &GrayWeights::new(2.0, 2.0, 2.0)).unwrap();
        assert_eq!(out, [255, 2]);
    }

    #[test]
    fn alpha_is_ignored() {
        let a = [10u8, 20, 30, 0];
        let b = [10u8, 20, 30, 255];
        let wts = GrayWeights::new(0.3, 0.3, 0.3);
        let ga = to_grayscale(&PixelBuffer::new(&a, 1, 1, 4, SourceFormat::Rgba).unwrap(), &wts);
        let gb = to_grayscale(&PixelBuffer::new(&b, 1, 1, 4, SourceFormat::Rgba).unwrap(), &wts);
        assert_eq!(ga, gb);
    }

    #[test]
    fn non_rgba_source_is_rejected() {
        let data = [0u8; 4];
        let src = PixelBuffer::new(&data, 1, 1, 4, SourceFormat::Bgra).unwrap();
        assert!(to_grayscale(&src, &GrayWeights::default()).unwrap_err().is_invalid_argument());
    }
}
