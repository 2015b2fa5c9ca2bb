use archmage::prelude::*;

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn shuffle4_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], order: [u8; 4]) {
    let [o0, o1, o2, o3] = order.map(usize::from);
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[o0];
        d[1] = s[o1];
        d[2] = s[o2];
        d[3] = s[o3];
    }
}

pub(super) fn expand3_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], order: [u8; 3]) {
    let [o0, o1, o2] = order.map(usize::from);
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[o0];
        d[1] = s[o1];
        d[2] = s[o2];
        d[3] = 0xFF;
    }
}

pub(super) fn gray_to_rgba_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (&v, d) in src.iter().zip(dst.chunks_exact_mut(4)) {
        d[0] = v;
        d[1] = v;
        d[2] = v;
        d[3] = 0xFF;
    }
}

pub(super) fn pick3_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], order: [u8; 3]) {
    let [o0, o1, o2] = order.map(usize::from);
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[o0];
        d[1] = s[o1];
        d[2] = s[o2];
    }
}

// ===========================================================================
// Scalar strided wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn shuffle4_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 4],
) {
    for y in 0..h {
        shuffle4_row_scalar(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4], order);
    }
}
pub(super) fn expand3_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 3],
) {
    for y in 0..h {
        expand3_row_scalar(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 4], order);
    }
}
pub(super) fn gray_to_rgba_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        gray_to_rgba_row_scalar(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 4]);
    }
}
pub(super) fn pick3_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    order: [u8; 3],
) {
    for y in 0..h {
        pick3_row_scalar(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3], order);
    }
}
