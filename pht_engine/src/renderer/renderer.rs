/// Renderer trait - the factory the scene graph creates renderables through

use std::fmt;
use std::sync::Arc;
use glam::Mat4;

use crate::error::Result;
use super::material::MaterialDesc;
use super::renderable::{MeshDesc, Renderable};

/// One renderable merged into a static batch
#[derive(Clone)]
pub struct BatchPart {
    /// Source renderable
    pub renderable: Arc<dyn Renderable>,
    /// Transform from the part's local space into the batch owner's local space
    pub transform: Mat4,
}

impl fmt::Debug for BatchPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchPart")
            .field("vertex_buffer_id", &self.renderable.vertex_buffer_id())
            .field("material_id", &self.renderable.material().material_id())
            .field("transform", &self.transform)
            .finish()
    }
}

/// Renderer collaborator
///
/// Implemented by the graphics backend. Scenes hold it as
/// `Arc<Mutex<dyn Renderer>>`, shared with their SceneManager.
pub trait Renderer: Send + Sync {
    /// Create a renderable from a mesh and a material description
    fn create_renderable(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
    ) -> Result<Arc<dyn Renderable>>;

    /// Create a renderable whose geometry stays CPU-readable so it can
    /// later be merged into a static batch
    fn create_batchable_renderable(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
    ) -> Result<Arc<dyn Renderable>>;

    /// Merge parts into one pre-baked renderable
    ///
    /// Returns `None` when the parts cannot be merged (not batchable,
    /// mixed materials, backend limits). The caller leaves its scene
    /// untouched in that case.
    fn create_static_batch(
        &mut self,
        name: &str,
        parts: &[BatchPart],
    ) -> Option<Arc<dyn Renderable>>;
}
