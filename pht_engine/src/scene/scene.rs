/// Scene - one renderable world: the object arena, its root, and the
/// per-scene render settings.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. Every object
/// created through a Scene is owned by its arena and dropped with it.
/// Hierarchy links are keys into the same arena.

use std::sync::{Arc, Mutex};
use glam::Mat4;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::renderer::{BatchPart, MaterialDesc, MeshDesc, Renderable, Renderer};
use super::component::{CameraComponent, LightComponent};
use super::render_pass::{DistanceFunction, RenderPassDesc};
use super::scene_object::{name_id, SceneObject, SceneObjectKey};
use super::text::{TextComponent, TextProperties};

/// Scene creation parameters
#[derive(Debug, Clone)]
pub struct SceneDesc {
    /// Unique scene name (hashed into the scene id)
    pub name: String,
    /// Distance function used when building render queues for this scene
    pub distance_function: DistanceFunction,
    /// Render passes, looked up in order
    pub render_passes: Vec<RenderPassDesc>,
}

impl SceneDesc {
    /// Scene with camera-space distances and no render passes
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            distance_function: DistanceFunction::CameraSpaceZ,
            render_passes: Vec::new(),
        }
    }
}

/// Handle returned by `Scene::create_text`.
///
/// Resolves to the text component through `Scene::text` / `Scene::text_mut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextHandle(SceneObjectKey);

impl TextHandle {
    /// Scene object carrying the text component
    pub fn object(&self) -> SceneObjectKey {
        self.0
    }
}

/// A scene graph with a single root.
///
/// At most one camera and one global light are active per scene. Creating
/// another one replaces the active one; the previous object stays in the
/// arena until destroyed.
pub struct Scene {
    /// Renderer collaborator (renderables, static batches)
    renderer: Arc<Mutex<dyn Renderer>>,
    name: String,
    name_id: u32,
    objects: SlotMap<SceneObjectKey, SceneObject>,
    root: SceneObjectKey,
    /// Active camera object
    camera: Option<SceneObjectKey>,
    /// Active global light object
    global_light: Option<SceneObjectKey>,
    distance_function: DistanceFunction,
    render_passes: Vec<RenderPassDesc>,
}

impl Scene {
    /// Create a new scene holding only its root (internal: only via SceneManager)
    pub(crate) fn new(renderer: Arc<Mutex<dyn Renderer>>, desc: SceneDesc) -> Self {
        let mut objects = SlotMap::with_key();
        let root = objects.insert(SceneObject::with_name(name_id("root")));
        Self {
            renderer,
            name_id: name_id(&desc.name),
            name: desc.name,
            objects,
            root,
            camera: None,
            global_light: None,
            distance_function: desc.distance_function,
            render_passes: desc.render_passes,
        }
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_id(&self) -> u32 {
        self.name_id
    }

    /// Root object, the start of every traversal
    pub fn root(&self) -> SceneObjectKey {
        self.root
    }

    pub fn object(&self, key: SceneObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn object_mut(&mut self, key: SceneObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    /// Number of objects in the arena, root included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over every object of the arena (attached or not)
    pub fn objects(&self) -> impl Iterator<Item = (SceneObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    pub fn renderer(&self) -> &Arc<Mutex<dyn Renderer>> {
        &self.renderer
    }

    pub fn distance_function(&self) -> DistanceFunction {
        self.distance_function
    }

    pub fn set_distance_function(&mut self, distance_function: DistanceFunction) {
        self.distance_function = distance_function;
    }

    // ===== FACTORIES =====

    /// Create an anonymous object without parent or renderable
    pub fn create_scene_object(&mut self) -> SceneObjectKey {
        self.objects.insert(SceneObject::new())
    }

    /// Create a named object without parent or renderable
    pub fn create_named_scene_object(&mut self, name: &str) -> SceneObjectKey {
        self.objects.insert(SceneObject::with_name(name_id(name)))
    }

    /// Create an object drawing an existing renderable
    pub fn create_scene_object_with_renderable(
        &mut self,
        renderable: Arc<dyn Renderable>,
    ) -> SceneObjectKey {
        self.objects.insert(SceneObject::with_renderable(renderable))
    }

    /// Create an object wired to a new renderable
    pub fn create_scene_object_with_mesh(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
    ) -> Result<SceneObjectKey> {
        let renderable = self.lock_renderer()?.create_renderable(mesh, material)?;
        Ok(self.create_scene_object_with_renderable(renderable))
    }

    /// Create an object wired to a new batchable renderable
    pub fn create_batchable_scene_object(
        &mut self,
        mesh: &MeshDesc,
        material: &MaterialDesc,
    ) -> Result<SceneObjectKey> {
        let renderable = self.lock_renderer()?.create_batchable_renderable(mesh, material)?;
        Ok(self.create_scene_object_with_renderable(renderable))
    }

    /// Create an anonymous object and attach it under `parent`
    pub fn create_child_scene_object(&mut self, parent: SceneObjectKey) -> Result<SceneObjectKey> {
        if !self.objects.contains_key(parent) {
            return Err(invalid_key("create_child_scene_object", parent));
        }
        let child = self.create_scene_object();
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Create a camera object under the root and make it the active camera
    pub fn create_camera(&mut self, camera: CameraComponent) -> SceneObjectKey {
        let mut object = SceneObject::with_name(name_id("camera"));
        object.set_component(camera);
        let key = self.objects.insert(object);
        self.attach(self.root, key);
        if self.camera.replace(key).is_some() {
            crate::engine_debug!("pht::Scene", "Scene '{}': active camera replaced", self.name);
        }
        key
    }

    /// Create a light object under the root and make it the global light
    pub fn create_global_light(&mut self, light: LightComponent) -> SceneObjectKey {
        let mut object = SceneObject::with_name(name_id("global_light"));
        object.set_component(light);
        let key = self.objects.insert(object);
        self.attach(self.root, key);
        if self.global_light.replace(key).is_some() {
            crate::engine_debug!("pht::Scene", "Scene '{}': global light replaced", self.name);
        }
        key
    }

    /// Create a text object, attached under `parent` when given
    pub fn create_text(
        &mut self,
        text: &str,
        properties: TextProperties,
        parent: Option<SceneObjectKey>,
    ) -> Result<TextHandle> {
        if let Some(parent) = parent {
            if !self.objects.contains_key(parent) {
                return Err(invalid_key("create_text", parent));
            }
        }

        let mut object = SceneObject::new();
        object.set_component(TextComponent::new(text, properties));
        let key = self.objects.insert(object);
        if let Some(parent) = parent {
            self.attach(parent, key);
        }
        Ok(TextHandle(key))
    }

    pub fn text(&self, handle: TextHandle) -> Option<&TextComponent> {
        self.objects.get(handle.0)?.component::<TextComponent>()
    }

    pub fn text_mut(&mut self, handle: TextHandle) -> Option<&mut TextComponent> {
        self.objects.get_mut(handle.0)?.component_mut::<TextComponent>()
    }

    // ===== CAMERA / LIGHT =====

    /// Active camera object
    pub fn camera(&self) -> Option<SceneObjectKey> {
        self.camera
    }

    pub fn camera_component(&self) -> Option<&CameraComponent> {
        self.objects.get(self.camera?)?.component::<CameraComponent>()
    }

    /// View matrix of the active camera (inverse of its world matrix)
    pub fn view_matrix(&self) -> Option<Mat4> {
        let object = self.objects.get(self.camera?)?;
        Some(CameraComponent::view_matrix(object.world_matrix()))
    }

    /// Active global light object
    pub fn global_light(&self) -> Option<SceneObjectKey> {
        self.global_light
    }

    pub fn global_light_component(&self) -> Option<&LightComponent> {
        self.objects.get(self.global_light?)?.component::<LightComponent>()
    }

    // ===== HIERARCHY =====

    /// Attach `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is detached from it first.
    /// Attaching an object beneath itself or one of its descendants is
    /// rejected.
    pub fn add_child(&mut self, parent: SceneObjectKey, child: SceneObjectKey) -> Result<()> {
        if !self.objects.contains_key(parent) {
            return Err(invalid_key("add_child", parent));
        }
        if !self.objects.contains_key(child) {
            return Err(invalid_key("add_child", child));
        }
        if self.is_ancestor_or_self(child, parent) {
            let message = format!("add_child: {:?} is an ancestor of {:?}", child, parent);
            crate::engine_error!("pht::Scene", "{}", message);
            return Err(Error::InvalidResource(message));
        }

        if let Some(old_parent) = self.objects[child].parent() {
            self.detach_child(old_parent, child);
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Detach one child from `parent`. Returns false if it is not a child.
    pub fn detach_child(&mut self, parent: SceneObjectKey, child: SceneObjectKey) -> bool {
        let removed = match self.objects.get_mut(parent) {
            Some(object) => object.remove_child(child),
            None => false,
        };
        if removed {
            if let Some(object) = self.objects.get_mut(child) {
                object.set_parent(None);
            }
        }
        removed
    }

    /// Detach every child of `parent`, returning the former children in order
    pub fn detach_children(&mut self, parent: SceneObjectKey) -> Vec<SceneObjectKey> {
        let children = match self.objects.get_mut(parent) {
            Some(object) => object.take_children(),
            None => return Vec::new(),
        };
        for &child in &children {
            if let Some(object) = self.objects.get_mut(child) {
                object.set_parent(None);
            }
        }
        children
    }

    /// Depth-first search of `from` and its descendants for an object named `name`
    pub fn find(&self, from: SceneObjectKey, name: u32) -> Option<SceneObjectKey> {
        let object = self.objects.get(from)?;
        if object.name() == name {
            return Some(from);
        }
        object.children().iter().find_map(|&child| self.find(child, name))
    }

    /// `find` from the root, by name string
    pub fn find_by_name(&self, name: &str) -> Option<SceneObjectKey> {
        self.find(self.root, name_id(name))
    }

    /// Erase one object. It is detached from its parent, its children are
    /// orphaned. The root cannot be destroyed.
    pub fn destroy_scene_object(&mut self, key: SceneObjectKey) -> bool {
        if key == self.root || !self.objects.contains_key(key) {
            return false;
        }
        if let Some(parent) = self.objects[key].parent() {
            self.detach_child(parent, key);
        }
        self.detach_children(key);
        self.objects.remove(key);

        if self.camera == Some(key) {
            self.camera = None;
        }
        if self.global_light == Some(key) {
            self.global_light = None;
        }
        true
    }

    /// Remove every object but a fresh root, and forget camera and light
    pub fn clear(&mut self) {
        self.objects.clear();
        self.root = self.objects.insert(SceneObject::with_name(name_id("root")));
        self.camera = None;
        self.global_light = None;
    }

    fn attach(&mut self, parent: SceneObjectKey, child: SceneObjectKey) {
        self.objects[parent].push_child(child);
        let object = &mut self.objects[child];
        object.set_parent(Some(parent));
        // The new parent chain invalidates the cached world matrix
        object.transform_mut().mark_changed();
    }

    fn is_ancestor_or_self(&self, ancestor: SceneObjectKey, mut key: SceneObjectKey) -> bool {
        loop {
            if key == ancestor {
                return true;
            }
            match self.objects.get(key).and_then(SceneObject::parent) {
                Some(parent) => key = parent,
                None => return false,
            }
        }
    }

    // ===== MATRIX PROPAGATION =====

    /// Per-frame propagation from the root; static subtrees are skipped
    pub fn update(&mut self) {
        self.update_object(self.root, false);
    }

    /// Settle every matrix, static objects included. Call once after
    /// building the scene.
    pub fn initial_update(&mut self) {
        self.initial_update_object(self.root, false);
    }

    /// Propagate from `key` down, skipping static children
    pub fn update_object(&mut self, key: SceneObjectKey, parent_matrix_changed: bool) {
        self.propagate(key, parent_matrix_changed, false);
    }

    /// Propagate from `key` down, visiting static children too
    pub fn initial_update_object(&mut self, key: SceneObjectKey, parent_matrix_changed: bool) {
        self.propagate(key, parent_matrix_changed, true);
    }

    fn propagate(&mut self, key: SceneObjectKey, parent_matrix_changed: bool, include_static: bool) {
        let parent_world = match self.objects.get(key).and_then(SceneObject::parent) {
            Some(parent) => self.objects.get(parent).map(|p| *p.world_matrix()),
            None => None,
        };
        let Some(object) = self.objects.get_mut(key) else {
            return;
        };

        let changed = parent_matrix_changed || object.transform().has_changed();
        if changed {
            object.refresh_world_matrix(parent_world.as_ref());
        }

        for index in 0..object_child_count(&self.objects, key) {
            let child = self.objects[key].children()[index];
            let skip = match self.objects.get(child) {
                Some(c) => !include_static && c.is_static(),
                None => true,
            };
            if !skip {
                self.propagate(child, changed, include_static);
            }
        }
    }

    // ===== STATIC BATCHING =====

    /// Bake `key` and its descendants into one renderable.
    ///
    /// On success the object's children are detached (their geometry now
    /// lives in the batch) and the object draws the batch. A subtree holding
    /// anything a batch cannot carry (hidden objects, components such as
    /// text) is refused. On failure nothing changes and false is returned.
    pub fn convert_scene_object_to_static_batch(&mut self, key: SceneObjectKey, name: &str) -> bool {
        if !self.objects.contains_key(key) {
            crate::engine_warn!("pht::Scene", "Static batch '{}': unknown object {:?}", name, key);
            return false;
        }
        if let Some(blocker) = self.find_unbakeable_descendant(key) {
            crate::engine_warn!("pht::Scene",
                "Static batch '{}' refused: descendant {:?} is hidden or carries components", name, blocker);
            return false;
        }

        let mut parts = Vec::new();
        self.collect_batch_parts(key, Mat4::IDENTITY, &mut parts);

        let batch = match self.renderer.lock() {
            Ok(mut renderer) => renderer.create_static_batch(name, &parts),
            Err(_) => {
                crate::engine_error!("pht::Scene", "Renderer lock poisoned");
                None
            }
        };

        let Some(batch) = batch else {
            crate::engine_warn!("pht::Scene",
                "Static batch '{}' refused ({} parts), object left untouched", name, parts.len());
            return false;
        };

        let detached = self.detach_children(key);
        self.objects[key].set_renderable(Some(batch));
        crate::engine_debug!("pht::Scene",
            "Static batch '{}': {} parts merged, {} children detached", name, parts.len(), detached.len());
        true
    }

    /// Relative transforms are composed from local matrices, so the cached
    /// world matrices do not need to be settled.
    fn collect_batch_parts(&self, key: SceneObjectKey, relative: Mat4, parts: &mut Vec<BatchPart>) {
        let Some(object) = self.objects.get(key) else {
            return;
        };
        if let Some(renderable) = object.renderable() {
            parts.push(BatchPart { renderable: renderable.clone(), transform: relative });
        }
        for &child in object.children() {
            if let Some(c) = self.objects.get(child) {
                self.collect_batch_parts(child, relative * c.transform().to_matrix(), parts);
            }
        }
    }

    /// First descendant of `key` whose content would be lost once its
    /// subtree is detached behind a batch
    fn find_unbakeable_descendant(&self, key: SceneObjectKey) -> Option<SceneObjectKey> {
        let object = self.objects.get(key)?;
        object.children().iter().find_map(|&child| {
            let c = self.objects.get(child)?;
            if !c.is_visible() || !c.components().is_empty() {
                Some(child)
            } else {
                self.find_unbakeable_descendant(child)
            }
        })
    }

    // ===== RENDER PASSES =====

    pub fn add_render_pass(&mut self, pass: RenderPassDesc) {
        self.render_passes.push(pass);
    }

    /// First pass whose mask contains layer `layer_index`
    pub fn render_pass(&self, layer_index: u8) -> Option<&RenderPassDesc> {
        self.render_passes.iter().find(|pass| pass.draws_layer(layer_index))
    }

    pub fn render_passes(&self) -> &[RenderPassDesc] {
        &self.render_passes
    }

    fn lock_renderer(&self) -> Result<std::sync::MutexGuard<'_, dyn Renderer + 'static>> {
        self.renderer.lock().map_err(|_| crate::engine_err!("pht::Scene", "Renderer lock poisoned"))
    }
}

fn object_child_count(objects: &SlotMap<SceneObjectKey, SceneObject>, key: SceneObjectKey) -> usize {
    objects.get(key).map_or(0, |object| object.children().len())
}

fn invalid_key(action: &str, key: SceneObjectKey) -> Error {
    let message = format!("{}: unknown scene object {:?}", action, key);
    crate::engine_error!("pht::Scene", "{}", message);
    Error::InvalidResource(message)
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
