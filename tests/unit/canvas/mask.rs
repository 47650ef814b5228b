use super::*;

#[test]
fn radial_mask_is_full_inside_and_empty_outside() {
    let m = SoftMask::Radial {
        center: Point::new(50.0, 50.0),
        inner: 10.0,
        outer: 20.0,
    };
    assert_eq!(m.coverage(Point::new(50.0, 50.0)), 1.0);
    assert_eq!(m.coverage(Point::new(75.0, 50.0)), 0.0);
    let mid = m.coverage(Point::new(65.0, 50.0));
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn degenerate_linear_mask_covers_everything() {
    let m = SoftMask::Linear {
        start: Point::new(1.0, 1.0),
        end: Point::new(1.0, 1.0),
    };
    assert_eq!(m.coverage(Point::new(100.0, -3.0)), 1.0);
}

#[test]
fn transformed_radial_scales_radii() {
    let m = SoftMask::Radial {
        center: Point::new(1.0, 1.0),
        inner: 2.0,
        outer: 4.0,
    };
    let t = m.transformed(Affine::translate((10.0, 0.0)) * Affine::scale(2.0));
    match t {
        SoftMask::Radial {
            center,
            inner,
            outer,
        } => {
            assert_eq!(center, Point::new(12.0, 2.0));
            assert!((inner - 4.0).abs() < 1e-9);
            assert!((outer - 8.0).abs() < 1e-9);
        }
        SoftMask::Linear { .. } => panic!("expected radial"),
    }
}

#[test]
fn center_align_offsets_half_width() {
    assert_eq!(TextAlign::Center.left_offset(10.0), -5.0);
    assert_eq!(TextAlign::Right.left_offset(10.0), -10.0);
    assert_eq!(TextAlign::Left.left_offset(10.0), 0.0);
}
