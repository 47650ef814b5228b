use super::*;

#[test]
fn over_with_zero_opacity_keeps_dst() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
}

#[test]
fn opaque_src_replaces_dst() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src, 1.0), src);
}

#[test]
fn transparent_dst_yields_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src, 1.0), src);
}

#[test]
fn mask_zero_coverage_clears_pixel() {
    let mut dst = vec![200, 100, 50, 255, 200, 100, 50, 255];
    let cov = vec![0, 0, 0, 0, 255, 255, 255, 255];
    mask_in_place(&mut dst, &cov).unwrap();
    assert_eq!(&dst[..4], &[0, 0, 0, 0]);
    assert_eq!(&dst[4..], &[200, 100, 50, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn soft_mask_fades_far_pixels() {
    let mut dst = [255u8; 4 * 4].to_vec();
    let mask = SoftMask::Radial {
        center: Point::new(0.5, 0.5),
        inner: 0.5,
        outer: 1.5,
    };
    soft_mask_in_place(&mut dst, 4, Point::ORIGIN, &mask);
    assert_eq!(dst[3], 255);
    assert_eq!(dst[15], 0);
}

#[test]
fn soft_mask_honours_the_tile_origin() {
    let mut dst = [255u8; 4].to_vec();
    let mask = SoftMask::Radial {
        center: Point::new(10.5, 10.5),
        inner: 0.5,
        outer: 1.5,
    };
    soft_mask_in_place(&mut dst, 1, Point::new(10.0, 10.0), &mask);
    assert_eq!(dst[3], 255);
}

#[test]
fn window_is_cut_to_the_frame() {
    let win = PixelWindow::covering(Rect::new(-3.5, 2.2, 5.1, 40.0), 8, 6).unwrap();
    assert_eq!(
        win,
        PixelWindow {
            x: 0,
            y: 2,
            w: 6,
            h: 4
        }
    );
    let outside = Rect::new(9.0, 0.0, 12.0, 3.0);
    assert!(PixelWindow::covering(outside, 8, 6).is_none());
    let invalid = Rect::new(f64::NAN, 0.0, 2.0, 2.0);
    assert!(PixelWindow::covering(invalid, 8, 6).is_none());
}

#[test]
fn tiles_round_trip_through_their_window() {
    let width = 4;
    let mut frame: Vec<u8> = (0..4 * 3 * 4).map(|i| i as u8).collect();
    let win = PixelWindow {
        x: 1,
        y: 1,
        w: 2,
        h: 2,
    };
    let tile = crop(&frame, width, win).unwrap();
    assert_eq!(&tile[..8], &frame[20..28]);
    assert_eq!(&tile[8..], &frame[36..44]);

    let red = [255, 0, 0, 255].repeat(4);
    over_window(&mut frame, width, &red, win).unwrap();
    assert_eq!(&frame[20..24], &[255, 0, 0, 255]);
    assert_eq!(&frame[16..20], &[16, 17, 18, 19]);
    assert!(over_window(&mut frame, width, &red[..4], win).is_err());
}
