//! Source formats, channel layouts and grayscale weights.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// SourceFormat
// ---------------------------------------------------------------------------

/// Byte layout of an incoming pixel buffer.
///
/// Every format has a fixed rule for producing canonical RGBA; see
/// [`normalize_to_rgba`](crate::normalize_to_rgba).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Red, green, blue. Alpha becomes 255.
    Rgb,
    /// Blue, green, red. Alpha becomes 255.
    Bgr,
    /// Alpha, red, green, blue.
    Argb,
    /// Alpha, blue, green, red.
    Abgr,
    /// Blue, green, red, alpha.
    Bgra,
    /// Red, green, blue, alpha. Already canonical.
    Rgba,
    /// One luminance byte, copied to R, G and B. Alpha becomes 255.
    Grayscale,
}

impl SourceFormat {
    /// All recognized formats, in tag order.
    pub const ALL: [SourceFormat; 7] = [
        Self::Rgb,
        Self::Bgr,
        Self::Argb,
        Self::Abgr,
        Self::Bgra,
        Self::Rgba,
        Self::Grayscale,
    ];

    /// Bytes occupied by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb | Self::Bgr => 3,
            Self::Argb | Self::Abgr | Self::Bgra | Self::Rgba => 4,
            Self::Grayscale => 1,
        }
    }

    /// The tag hosts use for this format (`"RGB"`, `"GRAYSCALE"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Bgr => "BGR",
            Self::Argb => "ARGB",
            Self::Abgr => "ABGR",
            Self::Bgra => "BGRA",
            Self::Rgba => "RGBA",
            Self::Grayscale => "GRAYSCALE",
        }
    }

    /// Whether the source carries its own alpha byte.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Argb | Self::Abgr | Self::Bgra | Self::Rgba)
    }

    /// For 4bpp formats: which source byte feeds R, G, B and A.
    pub(crate) const fn rgba_order(self) -> Option<[u8; 4]> {
        match self {
            Self::Argb => Some([1, 2, 3, 0]),
            Self::Abgr => Some([3, 2, 1, 0]),
            Self::Bgra => Some([2, 1, 0, 3]),
            Self::Rgba => Some([0, 1, 2, 3]),
            _ => None,
        }
    }

    /// For 3bpp formats: which source byte feeds R, G and B.
    pub(crate) const fn rgb_order(self) -> Option<[u8; 3]> {
        match self {
            Self::Rgb => Some([0, 1, 2]),
            Self::Bgr => Some([2, 1, 0]),
            _ => None,
        }
    }
}

impl FromStr for SourceFormat {
    type Err = ConvertError;

    /// Exact, case-sensitive match against [`SourceFormat::name`].
    fn from_str(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == tag)
            .ok_or_else(|| ConvertError::UnsupportedFormat(tag.to_string()))
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ChannelLayout
// ---------------------------------------------------------------------------

/// Output channel selection over an RGBA pixel: 3 or 4 indices in `0..=3`.
///
/// Index 0 is R, 1 is G, 2 is B, 3 is A. Repeats are allowed, so `[0, 0, 0]`
/// is a valid layout that writes the red byte three times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    indices: [u8; 4],
    len: u8,
}

impl ChannelLayout {
    pub const RGB: Self = Self::from_array3([0, 1, 2]);
    pub const BGR: Self = Self::from_array3([2, 1, 0]);
    pub const RGBA: Self = Self::from_array4([0, 1, 2, 3]);
    pub const BGRA: Self = Self::from_array4([2, 1, 0, 3]);
    pub const ARGB: Self = Self::from_array4([3, 0, 1, 2]);
    pub const ABGR: Self = Self::from_array4([3, 2, 1, 0]);

    const fn from_array3(i: [u8; 3]) -> Self {
        Self {
            indices: [i[0], i[1], i[2], 0],
            len: 3,
        }
    }

    const fn from_array4(indices: [u8; 4]) -> Self {
        Self { indices, len: 4 }
    }

    /// Validate a layout coming from a host.
    pub fn new(indices: &[u8]) -> Result<Self> {
        if !(3..=4).contains(&indices.len()) {
            return Err(ConvertError::InvalidArgument("layout length must be 3 or 4"));
        }
        if indices.iter().any(|&i| i > 3) {
            return Err(ConvertError::InvalidArgument(
                "layout index must be 0 (R), 1 (G), 2 (B) or 3 (A)",
            ));
        }
        let mut out = [0u8; 4];
        out[..indices.len()].copy_from_slice(indices);
        Ok(Self {
            indices: out,
            len: indices.len() as u8,
        })
    }

    /// Like [`ChannelLayout::new`] for the `i32` arrays hosts usually hold.
    pub fn from_i32s(indices: &[i32]) -> Result<Self> {
        if !(3..=4).contains(&indices.len()) {
            return Err(ConvertError::InvalidArgument("layout length must be 3 or 4"));
        }
        let mut narrowed = [0u8; 4];
        for (dst, &src) in narrowed.iter_mut().zip(indices) {
            *dst = u8::try_from(src).map_err(|_| {
                ConvertError::InvalidArgument("layout index must be 0 (R), 1 (G), 2 (B) or 3 (A)")
            })?;
        }
        Self::new(&narrowed[..indices.len()])
    }

    /// Number of output channels (3 or 4).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false`; present for clippy's `len_without_is_empty`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The selected RGBA indices, in output order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices[..self.len()]
    }
}

impl TryFrom<&[u8]> for ChannelLayout {
    type Error = ConvertError;

    fn try_from(indices: &[u8]) -> Result<Self> {
        Self::new(indices)
    }
}

// ---------------------------------------------------------------------------
// GrayWeights
// ---------------------------------------------------------------------------

/// Coefficients for R, G and B in the grayscale sum.
///
/// Not normalized: weights summing past 1.0 saturate at 255 and negative
/// weights can pull a pixel to 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl GrayWeights {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Accept exactly three weights from a host array.
    pub fn from_slice(weights: &[f32]) -> Result<Self> {
        match *weights {
            [r, g, b] => Ok(Self { r, g, b }),
            _ => Err(ConvertError::InvalidArgument(
                "weights must have 3 elements, one per R, G and B channel",
            )),
        }
    }
}

impl Default for GrayWeights {
    /// Luma weights used by the face pipeline's serializer.
    fn default() -> Self {
        Self::new(0.2989, 0.587, 0.114)
    }
}

impl TryFrom<&[f32]> for GrayWeights {
    type Error = ConvertError;

    fn try_from(weights: &[f32]) -> Result<Self> {
        Self::from_slice(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn tags_are_exact_and_case_sensitive() {
        for f in SourceFormat::ALL {
            assert_eq!(f.name().parse::<SourceFormat>(), Ok(f));
            assert_eq!(f.to_string(), f.name());
        }
        assert_eq!(
            "rgba".parse::<SourceFormat>(),
            Err(ConvertError::UnsupportedFormat("rgba".into()))
        );
        assert!("YUV420".parse::<SourceFormat>().unwrap_err().is_unsupported_format());
        assert!(" RGB".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn bytes_per_pixel_table() {
        let bpp: [usize; 7] = SourceFormat::ALL.map(|f| f.bytes_per_pixel());
        assert_eq!(bpp, [3, 3, 4, 4, 4, 4, 1]);
    }

    #[test]
    fn layout_length_must_be_3_or_4() {
        for len in [0usize, 1, 2, 5] {
            let indices = [0u8; 5];
            let err = ChannelLayout::new(&indices[..len]).unwrap_err();
            assert!(err.is_invalid_argument(), "len={len}");
        }
        assert_eq!(ChannelLayout::new(&[2, 1, 0]).unwrap(), ChannelLayout::BGR);
        assert_eq!(ChannelLayout::new(&[3, 0, 1, 2]).unwrap(), ChannelLayout::ARGB);
    }

    #[test]
    fn layout_allows_duplicates_but_not_out_of_range() {
        let l = ChannelLayout::new(&[0, 0, 0]).unwrap();
        assert_eq!(l.indices(), &[0, 0, 0]);
        assert!(ChannelLayout::new(&[0, 1, 4]).unwrap_err().is_invalid_argument());
        assert!(ChannelLayout::from_i32s(&[0, -1, 2]).unwrap_err().is_invalid_argument());
        assert_eq!(ChannelLayout::from_i32s(&[2, 1, 0, 3]).unwrap(), ChannelLayout::BGRA);
    }

    #[test]
    fn weights_need_exactly_three() {
        assert!(GrayWeights::from_slice(&[1.0, 0.0]).unwrap_err().is_invalid_argument());
        assert!(GrayWeights::from_slice(&[1.0, 0.0, 0.0, 0.0]).is_err());
        assert_eq!(
            GrayWeights::from_slice(&[0.5, 0.25, 0.25]).unwrap(),
            GrayWeights::new(0.5, 0.25, 0.25)
        );
    }
}
