use super::*;
use crate::effects::fixture::{Fixture, canvas};
use crate::params::ParamValue;
use kurbo::Shape as _;

#[test]
fn unit_outlines_are_closed_and_bounded() {
    for name in ShapeKind::NAMES {
        let path = ShapeKind::from_name(name).unit_path();
        let bb = path.bounding_box();
        assert!(bb.x0 >= -1.2 && bb.x1 <= 1.2, "{name}");
        assert!(bb.y0 >= -1.2 && bb.y1 <= 1.2, "{name}");
        assert!(path.area().abs() > 0.5, "{name}");
    }
}

#[test]
fn every_shape_clips_and_restores() {
    let input = Fixture::new("SHAPES");
    for name in ShapeKind::NAMES {
        let mut fx = ShapeMask::new(&EngineConfig::default());
        fx.init();
        fx.set_parameter("shape", ParamValue::Text((*name).to_owned()))
            .unwrap();
        let mut c = canvas();
        fx.render_lyric(&mut c, &input.at_progress(0.5, 0.0));
        assert_eq!(c.list().clips.len(), 1, "{name}");
        assert_eq!(c.list().texts().count(), 6);
        assert_eq!(c.depth(), 0);
    }
}

#[test]
fn soft_edge_also_attaches_a_radial_mask() {
    let input = Fixture::new("SOFT");
    let mut fx = ShapeMask::new(&EngineConfig::default());
    fx.init();
    fx.set_parameter("edge", ParamValue::Text("soft".to_owned()))
        .unwrap();
    let mut c = canvas();
    fx.render_lyric(&mut c, &input.at_progress(0.3, 0.0));
    let masks = c.list().masks.as_slice();
    assert!(matches!(masks, [SoftMask::Radial { .. }]));
}
