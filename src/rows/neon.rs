use archmage::prelude::*;
use safe_unaligned_simd::aarch64::{vld1q_u8, vst1q_u8};

use super::scalar::{
    expand3_row_scalar, gray_to_rgba_row_scalar, pick3_row_scalar, shuffle4_row_scalar,
};

// tbl lookups past index 15 produce 0.
const ZERO: u8 = 0x80;

const ALPHA_FF: [u8; 16] = [0, 0, 0, 0xFF, 0, 0, 0, 0xFF, 0, 0, 0, 0xFF, 0, 0, 0, 0xFF];

// ===========================================================================
// ARM NEON: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn shuffle4_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], order: [u8; 4]) {
    use core::arch::aarch64::vqtbl1q_u8;
    let mask_bytes: [u8; 16] = core::array::from_fn(|i| (i / 4 * 4) as u8 + order[i % 4]);
    let mask = vld1q_u8(&mask_bytes);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = vld1q_u8(s);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(d, vqtbl1q_u8(v, mask));
        i += 16;
    }
    shuffle4_row_scalar(ScalarToken, &src[i..], &mut dst[i..], order);
}

#[rite]
pub(super) fn expand3_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], order: [u8; 3]) {
    use core::arch::aarch64::{vorrq_u8, vqtbl1q_u8};
    let sb: [u8; 16] = core::array::from_fn(|i| match i % 4 {
        3 => ZERO,
        j => (i / 4 * 3) as u8 + order[j],
    });
    let shuf = vld1q_u8(&sb);
    let alpha = vld1q_u8(&ALPHA_FF);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 16 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = vld1q_u8(s);
        let d: &mut [u8; 16] = (&mut dst[id..id + 16]).try_into().unwrap();
        vst1q_u8(d, vorrq_u8(vqtbl1q_u8(v, shuf), alpha));
        is += 12;
        id += 16;
    }
    expand3_row_scalar(ScalarToken, &src[is..], &mut dst[id..], order);
}

#[rite]
pub(super) fn gray_to_rgba_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8]) {
    use core::arch::aarch64::{vorrq_u8, vqtbl1q_u8};
    let masks: [[u8; 16]; 4] = core::array::from_fn(|q| {
        core::array::from_fn(|i| if i % 4 == 3 { ZERO } else { (q * 4 + i / 4) as u8 })
    });
    let m: [_; 4] = core::array::from_fn(|i| vld1q_u8(&masks[i]));
    let alpha = vld1q_u8(&ALPHA_FF);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 64 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let grays = vld1q_u8(s);
        for (j, mask) in m.iter().enumerate() {
            let d: &mut [u8; 16] = (&mut dst[id + j * 16..id + (j + 1) * 16])
                .try_into()
                .unwrap();
            vst1q_u8(d, vorrq_u8(vqtbl1q_u8(grays, *mask), alpha));
        }
        is += 16;
        id += 64;
    }
    gray_to_rgba_row_scalar(ScalarToken, &src[is..], &mut dst[id..]);
}

#[rite]
pub(super) fn pick3_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], order: [u8; 3]) {
    use core::arch::aarch64::vqtbl1q_u8;
    let sb: [u8; 16] = core::array::from_fn(|k| match k {
        0..12 => (k / 3 * 4) as u8 + order[k % 3],
        _ => ZERO,
    });
    let shuf = vld1q_u8(&sb);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 12 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let mut tmp = [0u8; 16];
        vst1q_u8(&mut tmp, vqtbl1q_u8(vld1q_u8(s), shuf));
        dst[id..id + 12].copy_from_slice(&tmp[..12]);
        is += 16;
        id += 12;
    }
    pick3_row_scalar(ScalarToken, &src[is..], &mut dst[id..], order);
}

// ===========================================================================
// ARM NEON: arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn shuffle4_strided_arm_v2(
    t: Arm64V2Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 4],
) {
    for y in 0..h {
        shuffle4_row_arm_v2(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4], order);
    }
}
#[arcane]
pub(super) fn expand3_strided_arm_v2(
    t: Arm64V2Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 3],
) {
    for y in 0..h {
        expand3_row_arm_v2(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 4], order);
    }
}
#[arcane]
pub(super) fn gray_to_rgba_strided_arm_v2(
    t: Arm64V2Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        gray_to_rgba_row_arm_v2(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 4]);
    }
}
#[arcane]
pub(super) fn pick3_strided_arm_v2(
    t: Arm64V2Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 3],
) {
    for y in 0..h {
        pick3_row_arm_v2(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3], order);
    }
}
