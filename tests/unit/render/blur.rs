use super::*;

#[test]
fn zero_radius_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn flat_image_stays_flat() {
    let px = [10u8, 20, 30, 40];
    let src = px.repeat(12);
    assert_eq!(blur_rgba8_premul(&src, 4, 3, 3, 2.0).unwrap(), src);
}

#[test]
fn single_pixel_spreads_and_conserves_alpha() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let c = ((2 * w + 2) * 4) as usize;
    src[c..c + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();
    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: i32 = out.chunks_exact(4).map(|px| i32::from(px[3])).sum();
    assert!((sum_a - 255).abs() <= 4);
}

#[test]
fn mismatched_length_is_an_error() {
    assert!(blur_rgba8_premul(&[0u8; 3], 1, 1, 1, 1.0).is_err());
}

#[test]
fn shadow_kernel_handles_degenerate_blur() {
    assert_eq!(shadow_kernel(0.0).0, 0);
    assert_eq!(shadow_kernel(f64::NAN).0, 0);
    let (r, s) = shadow_kernel(10.0);
    assert!(r >= 15 && s > 0.0);
}
