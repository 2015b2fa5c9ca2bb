//! Typed entry points on [`rgb`] pixel types, via bytemuck.
//!
//! The pixel type carries the source format, so there is no tag to get
//! wrong:
//!
//! ```rust
//! use rgb::{Bgr, Rgba};
//! use pixcanon::typed_rgb;
//!
//! let bgr = vec![Bgr { b: 30u8, g: 20, r: 10 }; 4];
//! let img = typed_rgb::normalize_pixels(&bgr, 2, 2)?;
//! assert_eq!(img.as_pixels()[0], Rgba::new(10, 20, 30, 255));
//! # Ok::<(), pixcanon::ConvertError>(())
//! ```

use alloc::vec::Vec;

use rgb::{Bgr, Bgra, Gray, Rgb, Rgba};

use crate::buffer::{CanonicalImage, PixelBuffer};
use crate::error::{ConvertError, Result};
use crate::format::{GrayWeights, SourceFormat};
use crate::gray::to_grayscale;
use crate::normalize::{decode_rows, normalize_to_rgba};

/// A `u8` pixel type with a fixed [`SourceFormat`].
pub trait SourcePixel: bytemuck::Pod {
    const FORMAT: SourceFormat;
}

impl SourcePixel for Rgb<u8> {
    const FORMAT: SourceFormat = SourceFormat::Rgb;
}

impl SourcePixel for Bgr<u8> {
    const FORMAT: SourceFormat = SourceFormat::Bgr;
}

impl SourcePixel for Rgba<u8> {
    const FORMAT: SourceFormat = SourceFormat::Rgba;
}

impl SourcePixel for Bgra<u8> {
    const FORMAT: SourceFormat = SourceFormat::Bgra;
}

impl SourcePixel for Gray<u8> {
    const FORMAT: SourceFormat = SourceFormat::Grayscale;
}

/// Normalize a tightly packed `width × height` slice of pixels.
pub fn normalize_pixels<P: SourcePixel>(pixels: &[P], width: usize, height: usize) -> Result<CanonicalImage> {
    let bytes: &[u8] = bytemuck::cast_slice(pixels);
    let stride = width
        .checked_mul(P::FORMAT.bytes_per_pixel())
        .ok_or(ConvertError::InvalidArgument("width * bytes per pixel overflows"))?;
    normalize_to_rgba(bytes, width, height, stride, P::FORMAT)
}

/// Normalize `src` into a caller-provided `dst` of the same pixel count.
pub fn normalize_into<P: SourcePixel>(src: &[P], dst: &mut [Rgba<u8>]) -> Result<()> {
    if src.len() != dst.len() {
        return Err(ConvertError::InvalidArgument("source and destination pixel counts differ"));
    }
    let n = src.len();
    let src_bytes: &[u8] = bytemuck::cast_slice(src);
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(dst);
    decode_rows(src_bytes, dst_bytes, n, 1, src_bytes.len(), dst_bytes.len(), P::FORMAT)
}

/// Reduce tightly packed RGBA pixels to gray.
pub fn grayscale_pixels(
    pixels: &[Rgba<u8>],
    width: usize,
    height: usize,
    weights: &GrayWeights,
) -> Result<Vec<Gray<u8>>> {
    let bytes: &[u8] = bytemuck::cast_slice(pixels);
    let stride = width
        .checked_mul(4)
        .ok_or(ConvertError::InvalidArgument("width * 4 overflows"))?;
    let source = PixelBuffer::new(bytes, width, height, stride, SourceFormat::Rgba)?;
    Ok(cast_vec_or_copy(to_grayscale(&source, weights)?))
}

impl CanonicalImage {
    /// The image as typed RGBA pixels.
    pub fn as_pixels(&self) -> &[Rgba<u8>] {
        bytemuck::cast_slice(self.as_bytes())
    }

    /// Take the buffer as typed pixels, reusing the allocation when possible.
    pub fn into_pixels(self) -> Vec<Rgba<u8>> {
        cast_vec_or_copy(self.into_vec())
    }
}

fn cast_vec_or_copy<P: bytemuck::Pod>(bytes: Vec<u8>) -> Vec<P> {
    bytemuck::allocation::try_cast_vec(bytes).unwrap_or_else(|(_, bytes)| bytemuck::cast_slice(&bytes).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn each_pixel_type_decodes() {
        let want = Rgba::new(10u8, 20, 30, 255);
        assert_eq!(normalize_pixels(&[Rgb::new(10u8, 20, 30)], 1, 1).unwrap().as_pixels(), [want]);
        assert_eq!(
            normalize_pixels(&[Bgr { b: 30u8, g: 20, r: 10 }], 1, 1).unwrap().as_pixels(),
            [want]
        );
        assert_eq!(
            normalize_pixels(&[Bgra { b: 30u8, g: 20, r: 10, a: 7 }], 1, 1).unwrap().as_pixels(),
            [Rgba::new(10, 20, 30, 7)]
        );
        assert_eq!(
            normalize_pixels(&[Rgba::new(1u8, 2, 3, 4)], 1, 1).unwrap().as_pixels(),
            [Rgba::new(1, 2, 3, 4)]
        );
        assert_eq!(
            normalize_pixels(&[Gray::new(128u8)], 1, 1).unwrap().as_pixels(),
            [Rgba::new(128, 128, 128, 255)]
        );
    }

    #[test]
    fn normalize_into_checks_counts() {
        let src = vec![Gray::new(9u8); 3];
        let mut dst = vec![Rgba::default(); 3];
        normalize_into(&src, &mut dst).unwrap();
        assert!(dst.iter().all(|&px| px == Rgba::new(9, 9, 9, 255)));

        let mut short = vec![Rgba::default(); 2];
        assert!(normalize_into(&src, &mut short).unwrap_err().is_invalid_argument());
        let empty: [Gray<u8>; 0] = [];
        assert!(normalize_into(&empty, &mut []).is_err());
    }

    #[test]
    fn short_pixel_slice_is_rejected() {
        let pixels = vec![Rgb::new(0u8, 0, 0); 3];
        assert!(normalize_pixels(&pixels, 2, 2).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn grayscale_of_typed_pixels() {
        let pixels = [Rgba::new(200u8, 0, 0, 0), Rgba::new(0, 100, 0, 255)];
        let gray = grayscale_pixels(&pixels, 2, 1, &GrayWeights::new(0.5, 1.0, 0.0)).unwrap();
        assert_eq!(gray, [Gray::new(100u8), Gray::new(100)]);
    }

    #[test]
    fn into_pixels_keeps_contents() {
        let img = normalize_pixels(&[Rgb::new(1u8, 2, 3), Rgb::new(4, 5, 6)], 2, 1).unwrap();
        let pixels = img.into_pixels();
        assert_eq!(pixels, [Rgba::new(1, 2, 3, 255), Rgba::new(4, 5, 6, 255)]);
    }
}
