// ---------------------------------------------------------------------------
// Strided row kernels with SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops.
// #[arcane] strided wrappers loop over rows under a single dispatch via
// incant!. Scalar tails are shared with the scalar tier so every tier
// writes identical bytes.
// ---------------------------------------------------------------------------

#![allow(clippy::too_many_arguments)]

use archmage::incant;

use crate::buffer::strided_len;
use crate::error::{ConvertError, Result};

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(test)]
mod tests;

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_strided(len: usize, width: usize, height: usize, stride: usize, bpp: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidArgument("width and height must be greater than 0"));
    }
    let row_bytes = width
        .checked_mul(bpp)
        .ok_or(ConvertError::InvalidArgument("row size overflows"))?;
    if row_bytes > stride {
        return Err(ConvertError::InvalidArgument("stride is smaller than one row of pixels"));
    }
    let total =
        strided_len(row_bytes, height, stride).ok_or(ConvertError::InvalidArgument("image size overflows"))?;
    if len < total {
        return Err(ConvertError::InvalidArgument("buffer is too short for its dimensions"));
    }
    Ok(())
}

// ===========================================================================
// Dispatched kernels
// ===========================================================================

/// 4bpp → 4bpp where output byte `j` of each pixel is input byte `order[j]`.
///
/// `order` entries must be in `0..4`. Padding bytes are never read or written.
pub(crate) fn shuffle4_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    order: [u8; 4],
) -> Result<()> {
    check_strided(src.len(), width, height, src_stride, 4)?;
    check_strided(dst.len(), width, height, dst_stride, 4)?;
    debug_assert!(order.iter().all(|&o| o < 4));
    incant!(
        shuffle4_strided(src, dst, width, height, src_stride, dst_stride, order),
        [v3, arm_v2, scalar]
    );
    Ok(())
}

/// 3bpp → 4bpp, output bytes 0..3 from input bytes `order`, alpha = 255.
pub(crate) fn expand3_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    order: [u8; 3],
) -> Result<()> {
    check_strided(src.len(), width, height, src_stride, 3)?;
    check_strided(dst.len(), width, height, dst_stride, 4)?;
    debug_assert!(order.iter().all(|&o| o < 3));
    incant!(
        expand3_strided(src, dst, width, height, src_stride, dst_stride, order),
        [v3, arm_v2, scalar]
    );
    Ok(())
}

/// Gray (1 byte/px) → RGBA (4 bytes/px). R=G=B=gray, alpha=255.
pub(crate) fn gray_to_rgba_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<()> {
    check_strided(src.len(), width, height, src_stride, 1)?;
    check_strided(dst.len(), width, height, dst_stride, 4)?;
    incant!(
        gray_to_rgba_strided(src, dst, width, height, src_stride, dst_stride),
        [v3, arm_v2, scalar]
    );
    Ok(())
}

/// 4bpp → 3bpp where output byte `j` of each pixel is input byte `order[j]`.
pub(crate) fn pick3_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    order: [u8; 3],
) -> Result<()> {
    check_strided(src.len(), width, height, src_stride, 4)?;
    check_strided(dst.len(), width, height, dst_stride, 3)?;
    debug_assert!(order.iter().all(|&o| o < 4));
    incant!(
        pick3_strided(src, dst, width, height, src_stride, dst_stride, order),
        [v3, arm_v2, scalar]
    );
    Ok(())
}

// ===========================================================================
// Scalar-only kernels
// ===========================================================================

/// Copy `width * bpp` bytes per row between strided buffers.
pub(crate) fn copy_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    bpp: usize,
) -> Result<()> {
    check_strided(src.len(), width, height, src_stride, bpp)?;
    check_strided(dst.len(), width, height, dst_stride, bpp)?;
    let row_bytes = width * bpp;
    for y in 0..height {
        dst[y * dst_stride..][..row_bytes].copy_from_slice(&src[y * src_stride..][..row_bytes]);
    }
    Ok(())
}

/// RGBA → one byte per pixel: `clamp(trunc(r*wr + g*wg + b*wb), 0, 255)`.
///
/// The sum is evaluated left to right in `f32` and truncated toward zero
/// before clamping. Kept scalar so results never depend on FMA contraction.
pub(crate) fn luma_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    weights: [f32; 3],
) -> Result<()> {
    check_strided(src.len(), width, height, src_stride, 4)?;
    check_strided(dst.len(), width, height, width, 1)?;
    let [wr, wg, wb] = weights;
    for (y, out) in dst.chunks_exact_mut(width).take(height).enumerate() {
        let row = &src[y * src_stride..][..width * 4];
        for (px, o) in row.chunks_exact(4).zip(out.iter_mut()) {
            let sum = px[0] as f32 * wr + px[1] as f32 * wg + px[2] as f32 * wb;
            // `as` saturates and maps NaN to 0.
            *o = (sum as i32).clamp(0, 255) as u8;
        }
    }
    Ok(())
}
