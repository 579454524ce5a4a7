/// SceneObject - one node of the scene graph.
///
/// Objects live in their Scene's SlotMap arena. Parent and child links are
/// `SceneObjectKey`s, never references, so detaching or erasing a node can
/// never leave a dangling link behind. Hierarchy edits and matrix
/// propagation go through `Scene`, which owns the arena.

use std::hash::Hasher;
use std::sync::Arc;
use glam::{Mat4, Vec3};
use rustc_hash::FxHasher;
use slotmap::new_key_type;
use crate::renderer::Renderable;
use crate::error::{Error, Result};
use super::component::{Component, ComponentKind, ComponentType};
use super::render_pass::{layer_bit, MAX_LAYERS};
use super::transform::Transform;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SceneObject within a Scene.
    ///
    /// Keys remain valid until their own object is destroyed.
    pub struct SceneObjectKey;
}

// ===== NAMES =====

/// Name id of anonymous objects
pub const ANONYMOUS: u32 = 0;

/// Hash a name into the integer id used for lookups.
///
/// Never returns `ANONYMOUS`.
pub fn name_id(name: &str) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    let hash = hasher.finish();
    match (hash ^ (hash >> 32)) as u32 {
        ANONYMOUS => 1,
        id => id,
    }
}

// ===== SCENE OBJECT =====

/// A positioned node: transform, cached world matrix, optional renderable,
/// components, and hierarchy links.
pub struct SceneObject {
    name: u32,
    transform: Transform,
    /// Valid once a propagation pass visited this node after its last change
    world_matrix: Mat4,
    /// 0 = no layer of its own, drawn wherever an ancestor is
    layer_mask: u32,
    visible: bool,
    /// Skipped by `Scene::update`, settled only by `Scene::initial_update`
    is_static: bool,
    renderable: Option<Arc<dyn Renderable>>,
    /// At most one entry per ComponentKind
    components: Vec<Component>,
    parent: Option<SceneObjectKey>,
    /// Order is significant for tie-breaking in the render queue
    children: Vec<SceneObjectKey>,
}

impl SceneObject {
    /// Anonymous object without a renderable
    pub fn new() -> Self {
        Self {
            name: ANONYMOUS,
            transform: Transform::new(),
            world_matrix: Mat4::IDENTITY,
            layer_mask: 0,
            visible: true,
            is_static: false,
            renderable: None,
            components: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Object named by a precomputed name id
    pub fn with_name(name: u32) -> Self {
        Self { name, ..Self::new() }
    }

    /// Anonymous object drawing `renderable`
    pub fn with_renderable(renderable: Arc<dyn Renderable>) -> Self {
        Self { renderable: Some(renderable), ..Self::new() }
    }

    // ===== NAME =====

    pub fn name(&self) -> u32 {
        self.name
    }

    pub fn set_name(&mut self, name: u32) {
        self.name = name;
    }

    // ===== TRANSFORM =====

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.set_scale(scale);
    }

    /// Euler angles in degrees
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.set_rotation(rotation);
    }

    /// Cached world matrix from the last propagation pass
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Translation part of the cached world matrix
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    /// Recompute the world matrix from the transform and the parent's
    /// world matrix, then clear the transform's change flag.
    pub(crate) fn refresh_world_matrix(&mut self, parent_world: Option<&Mat4>) {
        let local = self.transform.to_matrix();
        self.world_matrix = match parent_world {
            Some(parent) => *parent * local,
            None => local,
        };
        self.transform.clear_changed();
    }

    // ===== FLAGS =====

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Invisible objects are skipped with their whole subtree by the render queue
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn layer_mask(&self) -> u32 {
        self.layer_mask
    }

    /// Set a raw layer bitmask (0 = follow the ancestors' layers)
    pub fn set_layer_mask(&mut self, mask: u32) {
        self.layer_mask = mask;
    }

    /// Put the object on exactly one layer: mask = `1 << index`.
    ///
    /// An out-of-range index is rejected and leaves the mask unchanged.
    pub fn set_layer(&mut self, index: u8) -> Result<()> {
        match layer_bit(index) {
            Some(bit) => {
                self.layer_mask = bit;
                Ok(())
            }
            None => {
                let message = format!("Layer {} out of range (max {})", index, MAX_LAYERS - 1);
                crate::engine_error!("pht::SceneObject", "{}", message);
                Err(Error::InvalidResource(message))
            }
        }
    }

    // ===== RENDERABLE =====

    pub fn renderable(&self) -> Option<&Arc<dyn Renderable>> {
        self.renderable.as_ref()
    }

    pub fn set_renderable(&mut self, renderable: Option<Arc<dyn Renderable>>) {
        self.renderable = renderable;
    }

    // ===== COMPONENTS =====

    /// Store a component, replacing the existing one of the same kind
    pub fn set_component<T: ComponentType>(&mut self, component: T) {
        let component = component.into();
        match self.components.iter_mut().find(|c| c.kind() == T::KIND) {
            Some(slot) => *slot = component,
            None => self.components.push(component),
        }
    }

    pub fn component<T: ComponentType>(&self) -> Option<&T> {
        self.components.iter().find_map(T::from_component)
    }

    pub fn component_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::from_component_mut)
    }

    /// Remove and return the component of type `T`
    pub fn remove_component<T: ComponentType>(&mut self) -> Option<Component> {
        let index = self.components.iter().position(|c| c.kind() == T::KIND)?;
        Some(self.components.remove(index))
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    // ===== HIERARCHY =====

    pub fn parent(&self) -> Option<SceneObjectKey> {
        self.parent
    }

    pub fn children(&self) -> &[SceneObjectKey] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<SceneObjectKey>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: SceneObjectKey) {
        self.children.push(child);
    }

    /// Remove one child link. Returns false if `child` is not a child.
    pub(crate) fn remove_child(&mut self, child: SceneObjectKey) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_children(&mut self) -> Vec<SceneObjectKey> {
        std::mem::take(&mut self.children)
    }
}

impl Default for SceneObject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_object_tests.rs"]
mod tests;
