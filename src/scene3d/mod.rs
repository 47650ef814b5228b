//! Offscreen 3D scene holding one mesh per character, handed back to the 2D canvas as a
//! projected [`Frame3D`].

use crate::canvas::{Canvas2D, TextAlign};
use crate::foundation::core::{Affine, Color, Vec3};
use crate::foundation::error::FxResult;
use crate::glyph::GlyphLayout;
use crate::model::visual::FontSpec;

pub(crate) mod software;

pub use software::SoftwareScene;

/// Handle of a mesh inside a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(pub u64);

/// Appearance shared by the meshes of one line.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshStyle {
    /// Font used to draw glyph faces.
    pub font: FontSpec,
    /// Face color.
    pub color: Color,
}

/// A flat glyph placed in 3D.
///
/// World space: origin at the canvas centre, `x` right, `y` down, `z` away from the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh3D {
    /// Lyric line owning the mesh.
    pub lyric_id: String,
    /// Glyph text (usually one character).
    pub glyph: String,
    /// Character index within the line.
    pub index: usize,
    /// Current position.
    pub position: Vec3,
    /// Euler rotation in radians (applied Y, then X, then Z).
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Resting position from layout.
    pub original_position: Vec3,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Face color.
    pub color: Color,
    /// Font used for the face.
    pub font: FontSpec,
    /// Hidden meshes are not projected.
    pub visible: bool,
}

impl Mesh3D {
    /// Mesh at rest at `position`.
    pub fn new(
        lyric_id: &str,
        glyph: &str,
        index: usize,
        position: Vec3,
        style: &MeshStyle,
    ) -> Self {
        Self {
            lyric_id: lyric_id.to_owned(),
            glyph: glyph.to_owned(),
            index,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            original_position: position,
            opacity: 1.0,
            color: style.color,
            font: style.font.clone(),
            visible: true,
        }
    }

    /// Return position, rotation, scale and opacity to their resting values.
    pub fn reset_pose(&mut self) {
        self.position = self.original_position;
        self.rotation = Vec3::ZERO;
        self.scale = Vec3::ONE;
        self.opacity = 1.0;
    }
}

/// One projected glyph ready for 2D compositing.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedGlyph {
    /// Glyph text.
    pub text: String,
    /// Glyph-local to canvas transform; the glyph is drawn centred at the local origin.
    pub affine: Affine,
    /// Opacity after culling.
    pub opacity: f64,
    /// Face color.
    pub color: Color,
    /// Font to draw with.
    pub font: FontSpec,
    /// View depth; items are sorted far to near.
    pub depth: f64,
}

/// Rendered scene surface, blitted by [`composite_frame`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame3D {
    /// Target width.
    pub width: u32,
    /// Target height.
    pub height: u32,
    /// Glyphs in painter's order.
    pub items: Vec<ProjectedGlyph>,
}

/// Offscreen 3D scene owning character meshes.
pub trait Scene3D {
    /// Resize if needed; returns `true` when the scene was re-initialized (all meshes dropped).
    fn ensure_size(&mut self, width: u32, height: u32) -> bool;
    /// Current target size.
    fn size(&self) -> (u32, u32);

    /// One mesh per non-blank glyph, anchored at its laid-out position.
    fn create_character_meshes(
        &mut self,
        lyric_id: &str,
        glyphs: &GlyphLayout,
        style: &MeshStyle,
    ) -> Vec<MeshId>;
    /// A free-standing mesh, e.g. an extrusion layer.
    fn create_mesh(&mut self, mesh: Mesh3D) -> MeshId;

    /// Mesh by id.
    fn mesh(&self, id: MeshId) -> Option<&Mesh3D>;
    /// Mesh by id, mutably.
    fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh3D>;
    /// Number of live meshes.
    fn mesh_count(&self) -> usize;

    /// Free one mesh; `false` when it did not exist.
    fn dispose_mesh(&mut self, id: MeshId) -> bool;
    /// Free every mesh of `lyric_id`.
    fn dispose_lyric(&mut self, lyric_id: &str);
    /// Free everything.
    fn dispose_all(&mut self);

    /// Project the scene.
    fn render(&self) -> Frame3D;
}

/// Constructor for scenes sized to the canvas.
pub type Scene3DFactory = fn(u32, u32) -> FxResult<Box<dyn Scene3D>>;

/// Default factory producing a [`SoftwareScene`].
pub fn software_scene_factory(width: u32, height: u32) -> FxResult<Box<dyn Scene3D>> {
    Ok(Box::new(SoftwareScene::new(width, height)?))
}

/// Draw a rendered frame onto the 2D canvas under its current transform.
pub fn composite_frame(canvas: &mut dyn Canvas2D, frame: &Frame3D) {
    let base = canvas.global_alpha();
    for item in &frame.items {
        if item.opacity <= 0.0 {
            continue;
        }
        canvas.save();
        canvas.transform(item.affine);
        canvas.set_global_alpha(base * item.opacity);
        canvas.set_font(&item.font);
        canvas.set_fill(item.color);
        canvas.set_text_align(TextAlign::Center);
        canvas.fill_text(&item.text, 0.0, 0.0);
        canvas.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene3d/composite.rs"]
mod tests;
