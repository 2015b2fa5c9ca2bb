//! Whole-image entry points using [`imgref`] types.
//!
//! Strided `ImgRef`s are read row by row; padding is skipped and the last
//! row may stop at its final pixel, as `imgref` allows.
//!
//! ```rust
//! use rgb::{Rgb, Rgba};
//! use imgref::ImgVec;
//! use pixcanon::img;
//!
//! let rgb_img = ImgVec::new(vec![Rgb::new(255u8, 0, 128); 100], 10, 10);
//! let rgba: ImgVec<Rgba<u8>> = img::normalize_img(rgb_img.as_ref())?;
//! assert_eq!(rgba.buf()[0], Rgba::new(255, 0, 128, 255));
//! # Ok::<(), pixcanon::ConvertError>(())
//! ```

use alloc::vec::Vec;
use core::mem::size_of;

use imgref::{ImgRef, ImgVec};
use rgb::{Gray, Rgba};

use crate::buffer::{CanonicalImage, PixelBuffer};
use crate::error::{ConvertError, Result};
use crate::format::{ChannelLayout, GrayWeights};
use crate::gray::to_grayscale;
use crate::normalize::normalize_buffer;
use crate::remap::remap_channels;
use crate::typed_rgb::SourcePixel;

fn view<'a, P: SourcePixel>(img: ImgRef<'a, P>) -> Result<PixelBuffer<'a>> {
    let (w, h) = (img.width(), img.height());
    let stride = img
        .stride()
        .checked_mul(size_of::<P>())
        .ok_or(ConvertError::InvalidArgument("stride overflows"))?;
    let buf: &'a [P] = img.into_buf();
    PixelBuffer::new_trailing(bytemuck::cast_slice(buf), w, h, stride, P::FORMAT)
}

/// Normalize any supported pixel image to tightly packed RGBA.
pub fn normalize_img<P: SourcePixel>(img: ImgRef<'_, P>) -> Result<ImgVec<Rgba<u8>>> {
    Ok(normalize_buffer(&view(img)?)?.into_imgvec())
}

/// Reduce an RGBA image to gray with `weights`.
pub fn grayscale_img(img: ImgRef<'_, Rgba<u8>>, weights: &GrayWeights) -> Result<ImgVec<Gray<u8>>> {
    let (w, h) = (img.width(), img.height());
    let gray: Vec<u8> = to_grayscale(&view(img)?, weights)?;
    let pixels: Vec<Gray<u8>> = gray.into_iter().map(Gray::new).collect();
    Ok(ImgVec::new(pixels, w, h))
}

/// Remap the channels of an RGBA image into a packed byte buffer.
pub fn remap_img(img: ImgRef<'_, Rgba<u8>>, layout: &ChannelLayout) -> Result<Vec<u8>> {
    remap_channels(&view(img)?, layout)
}

impl CanonicalImage {
    /// Borrow as an `imgref` view.
    pub fn as_imgref(&self) -> ImgRef<'_, Rgba<u8>> {
        ImgRef::new(self.as_pixels(), self.width(), self.height())
    }

    pub fn into_imgvec(self) -> ImgVec<Rgba<u8>> {
        let (w, h) = (self.width(), self.height());
        ImgVec::new(self.into_pixels(), w, h)
    }
}

impl From<CanonicalImage> for ImgVec<Rgba<u8>> {
    fn from(img: CanonicalImage) -> Self {
        img.into_imgvec()
    }
}
