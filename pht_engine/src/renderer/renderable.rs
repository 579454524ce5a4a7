/// Renderable trait and mesh descriptor

use std::sync::Arc;
use glam::Vec3;
use super::material::Material;

/// Descriptor for creating mesh geometry
#[derive(Debug, Clone, Default)]
pub struct MeshDesc {
    /// Debug name
    pub name: String,
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Triangle list indices (empty for non-indexed meshes)
    pub indices: Vec<u16>,
}

impl MeshDesc {
    /// Axis-aligned quad in the XY plane, centered on the origin
    pub fn quad(name: &str, width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            name: name.to_string(),
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// A drawable resource: geometry bound to a material
///
/// Created by a `Renderer`. Scene objects hold renderables through `Arc`
/// so one resource can be shared by many objects.
pub trait Renderable: Send + Sync {
    /// Material the renderable draws with
    fn material(&self) -> &Arc<dyn Material>;

    /// Stable identity of the vertex buffer the geometry lives in
    fn vertex_buffer_id(&self) -> u32;

    /// Whether the renderable may be merged into a static batch
    fn is_batchable(&self) -> bool;
}
