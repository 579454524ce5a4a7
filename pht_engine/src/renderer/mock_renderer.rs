/// Mock Renderer for unit tests (no GPU required)
///
/// Hands out sequential material and vertex buffer ids so sort keys are
/// predictable, and can be told to refuse static batches.

use std::sync::Arc;

use crate::error::Result;
use crate::renderer::{
    BatchPart, Material, MaterialDesc, MeshDesc, Renderable, Renderer,
};

// ============================================================================
// Mock Material
// ============================================================================

#[derive(Debug)]
pub struct MockMaterial {
    pub name: String,
    pub shader_id: u32,
    pub material_id: u32,
    pub depth_write: bool,
}

impl Material for MockMaterial {
    fn depth_write(&self) -> bool {
        self.depth_write
    }

    fn shader_id(&self) -> u32 {
        self.shader_id
    }

    fn material_id(&self) -> u32 {
        self.material_id
    }
}

// ============================================================================
// Mock Renderable
// ============================================================================

pub struct MockRenderable {
    pub name: String,
    pub material: Arc<dyn Material>,
    pub vertex_buffer_id: u32,
    pub batchable: bool,
}

impl MockRenderable {
    /// Build a renderable with explicit sort-key identities
    pub fn with_ids(
        shader_id: u32,
        material_id: u32,
        vertex_buffer_id: u32,
        depth_write: bool,
    ) -> Arc<dyn Renderable> {
        Arc::new(Self {
            name: format!("mock_{}_{}_{}", shader_id, material_id, vertex_buffer_id),
            material: Arc::new(MockMaterial {
                name: "mock".to_string(),
                shader_id,
                material_id,
                depth_write,
            }),
            vertex_buffer_id,
            batchable: true,
        })
    }
}

impl Renderable for MockRenderable {
    fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }

    fn vertex_buffer_id(&self) -> u32 {
        self.vertex_buffer_id
    }

    fn is_batchable(&self) -> bool {
        self.batchable
    }
}

// ============================================================================
// Mock Renderer
// ============================================================================

pub struct MockRenderer {
    next_material_id: u32,
    next_buffer_id: u32,
    /// When set, every create_static_batch call fails
    pub refuse_batches: bool,
    /// Number of successful static batches
    pub batches_created: usize,
    /// Parts received by the last create_static_batch call
    pub last_batch_parts: Vec<BatchPart>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            next_material_id: 1,
            next_buffer_id: 1,
            refuse_batches: false,
            batches_created: 0,
            last_batch_parts: Vec::new(),
        }
    }

    fn make_renderable(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
        batchable: bool,
    ) -> Arc<dyn Renderable> {
        let material_id = self.next_material_id;
        self.next_material_id += 1;
        let vertex_buffer_id = self.next_buffer_id;
        self.next_buffer_id += 1;

        Arc::new(MockRenderable {
            name: mesh.name.clone(),
            material: Arc::new(MockMaterial {
                name: material.name.clone(),
                shader_id: material.shader_id,
                material_id,
                depth_write: material.depth_write,
            }),
            vertex_buffer_id,
            batchable,
        })
    }
}

impl Renderer for MockRenderer {
    fn create_renderable(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
    ) -> Result<Arc<dyn Renderable>> {
        Ok(self.make_renderable(mesh, material, false))
    }

    fn create_batchable_renderable(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
    ) -> Result<Arc<dyn Renderable>> {
        Ok(self.make_renderable(mesh, material, true))
    }

    fn create_static_batch(
        &mut self,
        name: &str,
        parts: &[BatchPart],
    ) -> Option<Arc<dyn Renderable>> {
        self.last_batch_parts = parts.to_vec();
        if self.refuse_batches || parts.is_empty() {
            return None;
        }
        if parts.iter().any(|p| !p.renderable.is_batchable()) {
            return None;
        }

        let vertex_buffer_id = self.next_buffer_id;
        self.next_buffer_id += 1;
        self.batches_created += 1;

        Some(Arc::new(MockRenderable {
            name: name.to_string(),
            material: parts[0].renderable.material().clone(),
            vertex_buffer_id,
            batchable: false,
        }))
    }
}
