extern crate alloc;
extern crate std;
use super::*;
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

// --- Helpers to generate test data ---

fn make_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 251) as u8).collect()
}

// --- Reference (pixel-at-a-time) implementations for comparison ---

fn ref_shuffle4(src: &[u8], order: [u8; 4]) -> Vec<u8> {
    src.chunks_exact(4)
        .flat_map(|px| order.map(|o| px[o as usize]))
        .collect()
}

fn ref_expand3(src: &[u8], order: [u8; 3]) -> Vec<u8> {
    src.chunks_exact(3)
        .flat_map(|px| [px[order[0] as usize], px[order[1] as usize], px[order[2] as usize], 255])
        .collect()
}

fn ref_pick3(src: &[u8], order: [u8; 3]) -> Vec<u8> {
    src.chunks_exact(4)
        .flat_map(|px| order.map(|o| px[o as usize]))
        .collect()
}

fn ref_gray(src: &[u8]) -> Vec<u8> {
    src.iter().flat_map(|&g| [g, g, g, 255]).collect()
}

// Test sizes: small (remainder only), medium (SIMD + remainder), large (multiple SIMD chunks)
const TEST_PIXEL_COUNTS: &[usize] = &[1, 2, 3, 7, 8, 15, 16, 31, 32, 33, 63, 64, 65, 100];

const ORDERS4: &[[u8; 4]] = &[[1, 2, 3, 0], [3, 2, 1, 0], [2, 1, 0, 3], [0, 1, 2, 3], [3, 3, 0, 0]];
const ORDERS3: &[[u8; 3]] = &[[0, 1, 2], [2, 1, 0], [0, 0, 0], [1, 2, 0]];

// -----------------------------------------------------------------------
// SIMD-dispatched operations: tested at every capability tier
// -----------------------------------------------------------------------

#[test]
fn permutation_shuffle4() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &order in ORDERS4 {
            for &n in TEST_PIXEL_COUNTS {
                let src = make_bytes(n * 4);
                let mut dst = vec![0u8; n * 4];
                shuffle4_strided(&src, &mut dst, n, 1, n * 4, n * 4, order).unwrap();
                assert_eq!(dst, ref_shuffle4(&src, order), "shuffle4 {order:?} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("shuffle4: {report}");
}

#[test]
fn permutation_expand3() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &order in &[[0u8, 1, 2], [2, 1, 0]] {
            for &n in TEST_PIXEL_COUNTS {
                let src = make_bytes(n * 3);
                let mut dst = vec![0u8; n * 4];
                expand3_strided(&src, &mut dst, n, 1, n * 3, n * 4, order).unwrap();
                assert_eq!(dst, ref_expand3(&src, order), "expand3 {order:?} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("expand3: {report}");
}

#[test]
fn permutation_pick3() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &order in ORDERS3 {
            for &n in TEST_PIXEL_COUNTS {
                let src = make_bytes(n * 4);
                let mut dst = vec![0u8; n * 3];
                pick3_strided(&src, &mut dst, n, 1, n * 4, n * 3, order).unwrap();
                assert_eq!(dst, ref_pick3(&src, order), "pick3 {order:?} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("pick3: {report}");
}

#[test]
fn permutation_gray_to_rgba() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_bytes(n);
            let mut dst = vec![0u8; n * 4];
            gray_to_rgba_strided(&src, &mut dst, n, 1, n, n * 4).unwrap();
            assert_eq!(dst, ref_gray(&src), "gray_to_rgba n={n} tier={perm}");
        }
    });
    std::eprintln!("gray_to_rgba: {report}");
}

// -----------------------------------------------------------------------
// Strided variants: padding must be skipped on read and left alone on write
// -----------------------------------------------------------------------

#[test]
fn permutation_strided_shuffle4() {
    let report = for_each_token_permutation(policy(), |perm| {
        // 10 pixels wide, stride 48 bytes (12 pixels × 4bpp), 4 rows
        let (w, h, ss) = (10, 4, 48);
        let ds = w * 4 + 8;
        let src = make_bytes(ss * h);
        let mut dst = vec![0xCCu8; ds * h];
        shuffle4_strided(&src, &mut dst, w, h, ss, ds, [1, 2, 3, 0]).unwrap();
        for y in 0..h {
            for x in 0..w {
                let s = &src[y * ss + x * 4..][..4];
                let d = &dst[y * ds + x * 4..][..4];
                assert_eq!(d, [s[1], s[2], s[3], s[0]], "y={y} x={x} tier={perm}");
            }
            for i in (w * 4)..ds {
                assert_eq!(dst[y * ds + i], 0xCC, "padding corrupted y={y} i={i} tier={perm}");
            }
        }
    });
    std::eprintln!("strided_shuffle4: {report}");
}

#[test]
fn permutation_strided_expand_and_gray() {
    let report = for_each_token_permutation(policy(), |perm| {
        let (w, h) = (12, 3);
        let ds = w * 4;

        let ss = w * 3 + 6;
        let src = make_bytes(ss * h);
        let mut dst = vec![0u8; ds * h];
        expand3_strided(&src, &mut dst, w, h, ss, ds, [2, 1, 0]).unwrap();
        for y in 0..h {
            for x in 0..w {
                let s = &src[y * ss + x * 3..][..3];
                let d = &dst[y * ds + x * 4..][..4];
                assert_eq!(d, [s[2], s[1], s[0], 255], "strided bgr y={y} x={x} tier={perm}");
            }
        }

        let gs = w + 4;
        let gray = make_bytes(gs * h);
        let mut dst = vec![0u8; ds * h];
        gray_to_rgba_strided(&gray, &mut dst, w, h, gs, ds).unwrap();
        for y in 0..h {
            for x in 0..w {
                let g = gray[y * gs + x];
                let d = &dst[y * ds + x * 4..][..4];
                assert_eq!(d, [g, g, g, 255], "strided gray y={y} x={x} tier={perm}");
            }
        }
    });
    std::eprintln!("strided_expand_and_gray: {report}");
}

// -----------------------------------------------------------------------
// Validation and scalar-only kernels
// -----------------------------------------------------------------------

#[test]
fn strided_checks_reject_bad_geometry() {
    let src = [0u8; 40];
    let mut dst = [0u8; 40];
    // stride narrower than a row
    assert!(shuffle4_strided(&src, &mut dst, 3, 1, 8, 12, [0, 1, 2, 3]).is_err());
    // zero dimensions
    assert!(shuffle4_strided(&src, &mut dst, 0, 1, 4, 4, [0, 1, 2, 3]).is_err());
    // source too short for 3 rows 20 bytes apart
    assert!(copy_strided(&src, &mut dst, 4, 3, 20, 12, 1).is_err());
    // last row may omit its padding
    assert!(copy_strided(&src, &mut dst, 2, 3, 16, 12, 4).is_ok());
}

#[test]
fn luma_truncates_then_clamps() {
    let src = [
        10, 20, 30, 0, //
        255, 255, 255, 255, //
        0, 0, 0, 7, //
        1, 1, 1, 1,
    ];
    let mut dst = [0u8; 4];

    luma_strided(&src, &mut dst, 4, 1, 16, [1.0, 0.0, 0.0]).unwrap();
    assert_eq!(dst, [10, 255, 0, 1]);

    luma_strided(&src, &mut dst, 4, 1, 16, [0.0, 0.0, 0.0]).unwrap();
    assert_eq!(dst, [0; 4]);

    // 0.5 + 0.5 + 0.5 = 1.5 truncates to 1, 382.5 clamps to 255
    luma_strided(&src, &mut dst, 4, 1, 16, [0.5, 0.5, 0.5]).unwrap();
    assert_eq!(dst, [30, 255, 0, 1]);

    luma_strided(&src, &mut dst, 4, 1, 16, [-1.0, 0.0, 0.0]).unwrap();
    assert_eq!(dst, [0; 4]);

    luma_strided(&src, &mut dst, 4, 1, 16, [f32::NAN, 0.0, 0.0]).unwrap();
    assert_eq!(dst, [0; 4]);
}
