use super::*;
use crate::canvas::display_list::RecordingCanvas;

#[test]
fn composite_draws_each_item_with_its_transform() {
    let frame = Frame3D {
        width: 100,
        height: 100,
        items: vec![
            ProjectedGlyph {
                text: "A".into(),
                affine: Affine::translate((10.0, 20.0)),
                opacity: 0.5,
                color: Color::WHITE,
                font: FontSpec::default(),
                depth: 0.0,
            },
            ProjectedGlyph {
                text: "B".into(),
                affine: Affine::IDENTITY,
                opacity: 0.0,
                color: Color::WHITE,
                font: FontSpec::default(),
                depth: 0.0,
            },
        ],
    };
    let mut c = RecordingCanvas::new(100, 100);
    composite_frame(&mut c, &frame);
    assert_eq!(c.list().ops.len(), 1);
    assert_eq!(c.list().ops[0].alpha, 0.5);
    assert_eq!(c.depth(), 0);
}

#[test]
fn mesh_pose_reset_restores_rest_state() {
    let style = MeshStyle {
        font: FontSpec::default(),
        color: Color::WHITE,
    };
    let mut m = Mesh3D::new("l", "A", 0, Vec3::new(1.0, 2.0, 0.0), &style);
    m.position.z = 50.0;
    m.rotation.y = 1.0;
    m.opacity = 0.1;
    m.reset_pose();
    assert_eq!(m.position, m.original_position);
    assert_eq!(m.rotation, Vec3::ZERO);
    assert_eq!(m.opacity, 1.0);
}
