//! # pixcanon
//!
//! Canonical RGBA from whatever the camera, decoder or platform handed you.
//!
//! Three transforms over raw pixel buffers, plus the glue to move them in and
//! out of host-owned surfaces:
//!
//! - [`normalize_to_rgba`] decodes RGB, BGR, ARGB, ABGR, BGRA, RGBA or 8-bit
//!   gray, at any row stride, into tightly packed RGBA.
//! - [`remap_channels`] reorders or subsets the channels of an RGBA buffer
//!   into any 3- or 4-channel layout.
//! - [`to_grayscale`] reduces RGBA to one byte per pixel with caller weights.
//!
//! Row kernels dispatch at runtime to AVX2 (x86-64), NEON (AArch64) or
//! scalar code; every tier produces identical bytes.
//!
//! ## Host surfaces
//!
//! A host's native bitmaps are reached through [`PixelSurface`] and created
//! through [`SurfaceAllocator`]. The [`host`] functions take the raw shapes a
//! foreign runtime hands over (`i32` dimensions, string format tags) and lock
//! surfaces for exactly as long as they read or write them. [`Bitmap`] is a
//! plain in-memory surface.
//!
//! ## Feature flags
//!
//! - **`std`** (default): `std::error::Error` integration.
//! - **`rgb`**: typed entry points on [`rgb`] pixel types via bytemuck.
//! - **`imgref`**: whole-image entry points on [`imgref`] types. Implies `rgb`.
//! - **`tracing`**: `trace`-level events at the host boundary.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

mod bitmap;
mod buffer;
mod error;
mod format;
mod gray;
mod image;
mod normalize;
mod remap;
mod rows;
mod surface;

pub mod host;

pub use bitmap::{Bitmap, BitmapAllocator};
pub use buffer::{CanonicalImage, PixelBuffer};
pub use error::{ConvertError, Result};
pub use format::{ChannelLayout, GrayWeights, SourceFormat};
pub use gray::to_grayscale;
pub use image::Image;
pub use normalize::{normalize_buffer, normalize_tagged, normalize_to_rgba};
pub use remap::remap_channels;
pub use surface::{PixelSurface, SurfaceAllocator, SurfaceFormat, SurfaceInfo, SurfaceLock};

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod img;
