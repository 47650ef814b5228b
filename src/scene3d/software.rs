use std::collections::BTreeMap;

use glam::{DQuat, DVec3, EulerRot};

use super::{Frame3D, Mesh3D, MeshId, MeshStyle, ProjectedGlyph, Scene3D};
use crate::foundation::core::Affine;
use crate::foundation::error::{FxError, FxResult};
use crate::glyph::GlyphLayout;

const MAX_DIM: u32 = 16_384;
const NEAR: f64 = 1.0;

/// Perspective projection of flat glyph meshes, no GPU required.
#[derive(Clone, Debug)]
pub struct SoftwareScene {
    width: u32,
    height: u32,
    fov_deg: f64,
    meshes: BTreeMap<MeshId, Mesh3D>,
    next_id: u64,
}

impl SoftwareScene {
    /// Default vertical field of view in degrees.
    pub const DEFAULT_FOV: f64 = 50.0;

    /// Empty scene for a `width` x `height` target.
    pub fn new(width: u32, height: u32) -> FxResult<Self> {
        if width > MAX_DIM || height > MAX_DIM {
            return Err(FxError::scene(format!(
                "scene size {width}x{height} exceeds {MAX_DIM}"
            )));
        }
        Ok(Self {
            width,
            height,
            fov_deg: Self::DEFAULT_FOV,
            meshes: BTreeMap::new(),
            next_id: 0,
        })
    }

    /// Distance from the eye to the `z = 0` plane, in pixels.
    pub fn focal_length(&self) -> f64 {
        let half = (self.fov_deg.to_radians() / 2.0).tan();
        if half <= 0.0 || !half.is_finite() {
            return 0.0;
        }
        f64::from(self.height) / 2.0 / half
    }

    /// Screen position and scale factor of world point `p`, `None` behind the near plane.
    pub fn project(&self, p: DVec3) -> Option<(f64, f64, f64)> {
        let f = self.focal_length();
        let denom = f + p.z;
        if f <= 0.0 || denom <= NEAR || !denom.is_finite() {
            return None;
        }
        let s = f / denom;
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        Some((cx + p.x * s, cy + p.y * s, s))
    }

    fn project_mesh(&self, m: &Mesh3D) -> Option<ProjectedGlyph> {
        if !m.visible || m.opacity <= 0.0 || !m.position.is_finite() {
            return None;
        }
        let f = self.focal_length();
        let (sx, sy, s) = self.project(m.position)?;
        let q = DQuat::from_euler(EulerRot::YXZ, m.rotation.y, m.rotation.x, m.rotation.z);
        let ax = q * (DVec3::X * m.scale.x);
        let ay = q * (DVec3::Y * m.scale.y);
        let p = m.position;

        // Jacobian of the projection at p along each local axis.
        let col = |v: DVec3| {
            let k = s / (f + p.z);
            (s * v.x - k * p.x * v.z, s * v.y - k * p.y * v.z)
        };
        let (a, b) = col(ax);
        let (c, d) = col(ay);
        let affine = Affine::new([a, b, c, d, sx, sy]);
        if !affine.as_coeffs().iter().all(|v| v.is_finite()) {
            return None;
        }

        Some(ProjectedGlyph {
            text: m.glyph.clone(),
            affine,
            opacity: m.opacity.clamp(0.0, 1.0),
            color: m.color,
            font: m.font.clone(),
            depth: p.z,
        })
    }

    fn alloc_id(&mut self) -> MeshId {
        self.next_id += 1;
        MeshId(self.next_id)
    }
}

impl Scene3D for SoftwareScene {
    fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if (self.width, self.height) == (width, height) {
            return false;
        }
        tracing::debug!(width, height, "re-initializing software scene");
        self.width = width.min(MAX_DIM);
        self.height = height.min(MAX_DIM);
        self.meshes.clear();
        true
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn create_character_meshes(
        &mut self,
        lyric_id: &str,
        glyphs: &GlyphLayout,
        style: &MeshStyle,
    ) -> Vec<MeshId> {
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        let mut ids = Vec::with_capacity(glyphs.len());
        for g in glyphs.glyphs.iter().filter(|g| !g.is_blank()) {
            let mut buf = [0u8; 4];
            let pos = DVec3::new(g.cx() - cx, g.y - cy, 0.0);
            let mesh = Mesh3D::new(lyric_id, g.ch.encode_utf8(&mut buf), g.index, pos, style);
            ids.push(self.create_mesh(mesh));
        }
        ids
    }

    fn create_mesh(&mut self, mesh: Mesh3D) -> MeshId {
        let id = self.alloc_id();
        self.meshes.insert(id, mesh);
        id
    }

    fn mesh(&self, id: MeshId) -> Option<&Mesh3D> {
        self.meshes.get(&id)
    }

    fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh3D> {
        self.meshes.get_mut(&id)
    }

    fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    fn dispose_mesh(&mut self, id: MeshId) -> bool {
        self.meshes.remove(&id).is_some()
    }

    fn dispose_lyric(&mut self, lyric_id: &str) {
        self.meshes.retain(|_, m| m.lyric_id != lyric_id);
    }

    fn dispose_all(&mut self) {
        self.meshes.clear();
    }

    fn render(&self) -> Frame3D {
        let mut items: Vec<ProjectedGlyph> = self
            .meshes
            .values()
            .filter_map(|m| self.project_mesh(m))
            .collect();
        items.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        Frame3D {
            width: self.width,
            height: self.height,
            items,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene3d/software.rs"]
mod tests;
