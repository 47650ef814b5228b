use super::*;
use crate::foundation::core::Color;
use crate::glyph::GlyphPos;
use crate::model::visual::FontSpec;

fn style() -> MeshStyle {
    MeshStyle {
        font: FontSpec::default(),
        color: Color::WHITE,
    }
}

fn layout() -> GlyphLayout {
    let glyphs = "A B"
        .chars()
        .enumerate()
        .map(|(index, ch)| GlyphPos {
            ch,
            index,
            x: 100.0 + index as f64 * 20.0,
            y: 100.0,
            width: 20.0,
        })
        .collect();
    GlyphLayout {
        glyphs,
        total_width: 60.0,
    }
}

#[test]
fn meshes_skip_blank_glyphs_and_rest_at_layout() {
    let mut scene = SoftwareScene::new(200, 200).unwrap();
    let ids = scene.create_character_meshes("l1", &layout(), &style());
    assert_eq!(ids.len(), 2);
    let m = scene.mesh(ids[0]).unwrap();
    assert_eq!(m.original_position, DVec3::new(10.0, 0.0, 0.0));
}

#[test]
fn unrotated_mesh_at_zero_depth_projects_to_layout_position() {
    let mut scene = SoftwareScene::new(200, 200).unwrap();
    scene.create_character_meshes("l1", &layout(), &style());
    let frame = scene.render();
    assert_eq!(frame.items.len(), 2);
    let a = frame.items[0].affine.as_coeffs();
    assert!((a[0] - 1.0).abs() < 1e-9 && (a[3] - 1.0).abs() < 1e-9);
    assert!((a[4] - 110.0).abs() < 1e-9 || (a[4] - 150.0).abs() < 1e-9);
}

#[test]
fn farther_meshes_are_smaller_and_drawn_first() {
    let mut scene = SoftwareScene::new(200, 200).unwrap();
    let ids = scene.create_character_meshes("l1", &layout(), &style());
    scene.mesh_mut(ids[1]).unwrap().position.z = 300.0;
    let frame = scene.render();
    assert_eq!(frame.items[0].text, "B");
    assert!(frame.items[0].affine.determinant() < 1.0);
}

#[test]
fn meshes_behind_the_camera_are_culled() {
    let mut scene = SoftwareScene::new(200, 200).unwrap();
    let ids = scene.create_character_meshes("l1", &layout(), &style());
    let f = scene.focal_length();
    scene.mesh_mut(ids[0]).unwrap().position.z = -f - 10.0;
    scene.mesh_mut(ids[1]).unwrap().opacity = 0.0;
    assert!(scene.render().items.is_empty());
}

#[test]
fn resize_drops_meshes() {
    let mut scene = SoftwareScene::new(200, 200).unwrap();
    scene.create_character_meshes("l1", &layout(), &style());
    assert!(!scene.ensure_size(200, 200));
    assert!(scene.ensure_size(300, 200));
    assert_eq!(scene.mesh_count(), 0);
}

#[test]
fn dispose_by_lyric_and_id() {
    let mut scene = SoftwareScene::new(200, 200).unwrap();
    let a = scene.create_character_meshes("l1", &layout(), &style());
    scene.create_character_meshes("l2", &layout(), &style());
    assert!(scene.dispose_mesh(a[0]));
    assert!(!scene.dispose_mesh(a[0]));
    scene.dispose_lyric("l2");
    assert_eq!(scene.mesh_count(), 1);
    scene.dispose_all();
    assert_eq!(scene.mesh_count(), 0);
}

#[test]
fn zero_size_scene_renders_nothing() {
    let mut scene = SoftwareScene::new(0, 0).unwrap();
    scene.create_character_meshes("l1", &layout(), &style());
    assert!(scene.render().items.is_empty());
    assert!(SoftwareScene::new(100_000, 10).is_err());
}
