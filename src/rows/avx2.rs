use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::scalar::{
    expand3_row_scalar, gray_to_rgba_row_scalar, pick3_row_scalar, shuffle4_row_scalar,
};

// ===========================================================================
// SIMD constants and per-lane mask builders
// ===========================================================================

const ALPHA_FF_MASK_AVX: [i8; 32] = [
    0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0,
    0, 0, -1,
];

const GRAY_EXPAND_MASK_AVX: [i8; 32] = [
    0, 0, 0, -128, 1, 1, 1, -128, 2, 2, 2, -128, 3, 3, 3, -128, 4, 4, 4, -128, 5, 5, 5, -128, 6, 6,
    6, -128, 7, 7, 7, -128,
];

// Dword permutation: 12 source bytes into each 16-byte lane (pixels 0-3 | 4-7)
const RGB_ALIGN_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0,
];

// Pack permutation: merge 12 bytes from each 16-byte lane into contiguous 24 bytes
const PACK_3X4_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// pshufb indexes within each 128-bit lane; 0x80 zeroes the byte.
const ZERO: u8 = 0x80;

fn shuffle4_mask(order: [u8; 4]) -> [u8; 32] {
    core::array::from_fn(|i| ((i % 16) / 4 * 4) as u8 + order[i % 4])
}

fn expand3_mask(order: [u8; 3]) -> [u8; 32] {
    core::array::from_fn(|i| match i % 4 {
        3 => ZERO,
        j => ((i % 16) / 4 * 3) as u8 + order[j],
    })
}

fn pick3_mask(order: [u8; 3]) -> [u8; 32] {
    core::array::from_fn(|i| match i % 16 {
        k @ 0..12 => (k / 3 * 4) as u8 + order[k % 3],
        _ => ZERO,
    })
}

// ===========================================================================
// x86-64 AVX2: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn shuffle4_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], order: [u8; 4]) {
    let mask_bytes = shuffle4_mask(order);
    let mask = _mm256_loadu_si256(&mask_bytes);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 32 <= n {
        let s: &[u8; 32] = src[i..i + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let shuffled = _mm256_shuffle_epi8(v, mask);
        let d: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, shuffled);
        i += 32;
    }
    shuffle4_row_scalar(ScalarToken, &src[i..], &mut dst[i..], order);
}

#[rite]
pub(super) fn expand3_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], order: [u8; 3]) {
    let perm = _mm256_loadu_si256(&RGB_ALIGN_PERM_AVX);
    let shuf_bytes = expand3_mask(order);
    let shuf = _mm256_loadu_si256(&shuf_bytes);
    let alpha = _mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 32 <= slen && id + 32 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let rgb = _mm256_loadu_si256(s);
        let aligned = _mm256_permutevar8x32_epi32(rgb, perm);
        let rgba = _mm256_or_si256(_mm256_shuffle_epi8(aligned, shuf), alpha);
        let d: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, rgba);
        is += 24;
        id += 32;
    }
    expand3_row_scalar(ScalarToken, &src[is..], &mut dst[id..], order);
}

#[rite]
pub(super) fn gray_to_rgba_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let expand = _mm256_loadu_si256(&GRAY_EXPAND_MASK_AVX);
    let alpha = _mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 8 <= slen && id + 32 <= dlen {
        let gray8 = u64::from_ne_bytes(src[is..is + 8].try_into().unwrap());
        let grays = _mm256_set1_epi64x(gray8 as i64);
        let rgba = _mm256_or_si256(_mm256_shuffle_epi8(grays, expand), alpha);
        let d: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, rgba);
        is += 8;
        id += 32;
    }
    gray_to_rgba_row_scalar(ScalarToken, &src[is..], &mut dst[id..]);
}

#[rite]
pub(super) fn pick3_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], order: [u8; 3]) {
    let shuf_bytes = pick3_mask(order);
    let shuf = _mm256_loadu_si256(&shuf_bytes);
    let pack = _mm256_loadu_si256(&PACK_3X4_PERM_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 32 <= slen && id + 24 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let picked = _mm256_shuffle_epi8(v, shuf);
        let packed = _mm256_permutevar8x32_epi32(picked, pack);
        let mut tmp = [0u8; 32];
        _mm256_storeu_si256(&mut tmp, packed);
        dst[id..id + 24].copy_from_slice(&tmp[..24]);
        is += 32;
        id += 24;
    }
    pick3_row_scalar(ScalarToken, &src[is..], &mut dst[id..], order);
}

// ===========================================================================
// x86-64 AVX2: arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn shuffle4_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 4],
) {
    for y in 0..h {
        shuffle4_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4], order);
    }
}
#[arcane]
pub(super) fn expand3_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 3],
) {
    for y in 0..h {
        expand3_row_v3(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 4], order);
    }
}
#[arcane]
pub(super) fn gray_to_rgba_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        gray_to_rgba_row_v3(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn pick3_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 3],
) {
    for y in 0..h {
        pick3_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3], order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_stay_inside_their_lane() {
        let m = shuffle4_mask([3, 2, 1, 0]);
        assert_eq!(&m[..8], &[3, 2, 1, 0, 7, 6, 5, 4]);
        assert_eq!(&m[16..20], &[3, 2, 1, 0]);

        let m = expand3_mask([2, 1, 0]);
        assert_eq!(&m[..8], &[2, 1, 0, ZERO, 5, 4, 3, ZERO]);
        assert_eq!(&m[16..20], &[2, 1, 0, ZERO]);

        let m = pick3_mask([0, 0, 3]);
        assert_eq!(&m[..6], &[0, 0, 3, 4, 4, 7]);
        assert_eq!(&m[12..16], &[ZERO; 4]);
        assert_eq!(&m[16..19], &[0, 0, 3]);
    }
}
