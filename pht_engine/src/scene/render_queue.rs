/// RenderQueue - the sorted draw list of one render pass.
///
/// `build` scans a scene from its root, emits one entry per renderable and
/// one per text pass, computes camera-relative distances, then sorts. The
/// backing array is sized once by `init` and shared by two partitions:
/// depth-writing entries grow from the front, blended entries grow from
/// the back. Iteration walks the front partition, then the back one.

use std::cmp::Ordering;
use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::renderer::Renderable;
use super::render_pass::{DistanceFunction, RenderOrder, RenderPassDesc};
use super::scene::Scene;
use super::scene_object::{SceneObject, SceneObjectKey};
use super::text::{TextComponent, TextKind, TextProperties};

/// Most entries a single text object can emit (second shadow, shadow,
/// specular, main pass)
pub const MAX_TEXT_ENTRIES: usize = 4;

// ===== SORT KEY =====

/// Composite draw-state key, compared field by field in declaration order.
///
/// Sorting descending groups draws by decreasing cost of a state switch:
/// depth-write state, text pass kind, shader, material, vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SortKey {
    pub depth_write: bool,
    pub text_kind: Option<TextKind>,
    pub shader_id: u32,
    pub material_id: u32,
    pub vertex_buffer_id: u32,
}

impl SortKey {
    pub fn for_renderable(renderable: &dyn Renderable) -> Self {
        let material = renderable.material();
        Self {
            depth_write: material.depth_write(),
            text_kind: None,
            shader_id: material.shader_id(),
            material_id: material.material_id(),
            vertex_buffer_id: renderable.vertex_buffer_id(),
        }
    }

    /// Text never writes depth
    pub fn for_text(properties: &TextProperties, kind: TextKind) -> Self {
        Self {
            depth_write: false,
            text_kind: Some(kind),
            shader_id: properties.font.shader_id(),
            material_id: properties.font.material_id(),
            vertex_buffer_id: 0,
        }
    }
}

// ===== ENTRY =====

/// What an entry draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrySource {
    /// The object's renderable
    Renderable,
    /// One pass of the object's text component
    Text(TextKind),
}

/// One draw of the queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    key: SortKey,
    distance: f32,
    object: SceneObjectKey,
    source: EntrySource,
}

impl Entry {
    pub fn key(&self) -> &SortKey {
        &self.key
    }

    /// Signed distance from the camera, per the scene's distance function
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Source object. Valid as long as the object is not destroyed.
    pub fn object(&self) -> SceneObjectKey {
        self.object
    }

    pub fn source(&self) -> EntrySource {
        self.source
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            key: SortKey::default(),
            distance: 0.0,
            object: SceneObjectKey::default(),
            source: EntrySource::Renderable,
        }
    }
}

// ===== DISTANCE =====

impl DistanceFunction {
    /// Sort distance of a world-space position
    pub fn distance(self, view: &Mat4, world_position: Vec3) -> f32 {
        match self {
            DistanceFunction::CameraSpaceZ => -view.transform_point3(world_position).z,
            DistanceFunction::WorldZ => world_position.z,
            DistanceFunction::NegatedWorldZ => -world_position.z,
        }
    }
}

// ===== ORDERINGS =====

fn key_descending(a: &Entry, b: &Entry) -> Ordering {
    b.key.cmp(&a.key)
}

fn near_to_far(a: &Entry, b: &Entry) -> Ordering {
    a.distance.total_cmp(&b.distance)
}

fn far_to_near(a: &Entry, b: &Entry) -> Ordering {
    b.distance.total_cmp(&a.distance)
}

// ===== RENDER QUEUE =====

/// Sorted, partitioned draw list for one render pass.
///
/// Lifecycle: `init` once per scene, then per pass and frame `build`
/// followed by iteration. Each `build` discards the previous entries and
/// reuses the backing array.
pub struct RenderQueue {
    /// Front partition at `[0, front_len)`, back partition at
    /// `[capacity - back_len, capacity)`
    entries: Vec<Entry>,
    front_len: usize,
    back_len: usize,
    initialized: bool,
    /// Iteration position over front then back partition
    cursor: usize,
}

impl RenderQueue {
    /// Create an uninitialized queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            front_len: 0,
            back_len: 0,
            initialized: false,
            cursor: 0,
        }
    }

    /// Size the backing array for every object currently in `scene`.
    ///
    /// Objects added afterwards may overflow it; call `init` again after
    /// growing the scene.
    pub fn init(&mut self, scene: &Scene) {
        let capacity = max_entry_count(scene);
        self.entries.clear();
        self.entries.resize(capacity, Entry::default());
        self.front_len = 0;
        self.back_len = 0;
        self.cursor = 0;
        self.initialized = true;
        crate::engine_debug!("pht::RenderQueue",
            "Initialized for scene '{}' with capacity {}", scene.name(), capacity);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Size of the backing array
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Rebuild the queue for one pass.
    ///
    /// # Errors
    ///
    /// - `NotInitialized` if `init` was never called
    /// - `CapacityExceeded` if the scene grew past the size seen by `init`
    pub fn build(
        &mut self,
        scene: &Scene,
        view: &Mat4,
        render_order: RenderOrder,
        distance_function: DistanceFunction,
        layer_mask: u32,
    ) -> Result<()> {
        if !self.initialized {
            crate::engine_error!("pht::RenderQueue", "build called before init");
            return Err(Error::NotInitialized("RenderQueue::build called before init".to_string()));
        }

        self.front_len = 0;
        self.back_len = 0;
        self.cursor = 0;

        let split = render_order != RenderOrder::BackToFront;
        if let Err(err) = self.scan(scene, scene.root(), false, layer_mask, split) {
            self.front_len = 0;
            self.back_len = 0;
            crate::engine_error!("pht::RenderQueue", "Scan of scene '{}' failed: {}", scene.name(), err);
            return Err(err);
        }

        self.compute_distances(scene, view, distance_function);
        self.sort(render_order);
        self.begin_iteration();

        crate::engine_trace!("pht::RenderQueue",
            "Built {} entries ({} front, {} back) for mask {:#x}",
            self.len(), self.front_len, self.back_len, layer_mask);
        Ok(())
    }

    /// `build` with a pass descriptor, the scene's active camera (identity
    /// view without one) and the scene's distance function
    pub fn build_pass(&mut self, scene: &Scene, pass: &RenderPassDesc) -> Result<()> {
        let view = scene.view_matrix().unwrap_or(Mat4::IDENTITY);
        self.build(scene, &view, pass.render_order, scene.distance_function(), pass.layer_mask)
    }

    fn scan(
        &mut self,
        scene: &Scene,
        key: SceneObjectKey,
        ancestor_matched: bool,
        layer_mask: u32,
        split: bool,
    ) -> Result<()> {
        let Some(object) = scene.object(key) else {
            return Ok(());
        };
        if !object.is_visible() {
            return Ok(());
        }

        // Mask 0 inherits the ancestors' match state. A node on other layers
        // is not drawn, its descendants may still be.
        let matched = ancestor_matched || object.layer_mask() & layer_mask != 0;
        if matched {
            self.emit(key, object, split)?;
        }

        for &child in object.children() {
            self.scan(scene, child, matched, layer_mask, split)?;
        }
        Ok(())
    }

    fn emit(&mut self, key: SceneObjectKey, object: &SceneObject, split: bool) -> Result<()> {
        if let Some(renderable) = object.renderable() {
            let sort_key = SortKey::for_renderable(renderable.as_ref());
            let back = split && !sort_key.depth_write;
            self.push(Entry { key: sort_key, distance: 0.0, object: key, source: EntrySource::Renderable }, back)?;
        }

        if let Some(text) = object.component::<TextComponent>() {
            let properties = text.properties();
            for kind in properties.pass_kinds() {
                let entry = Entry {
                    key: SortKey::for_text(properties, kind),
                    distance: 0.0,
                    object: key,
                    source: EntrySource::Text(kind),
                };
                self.push(entry, split)?;
            }
        }
        Ok(())
    }

    fn push(&mut self, entry: Entry, back: bool) -> Result<()> {
        let capacity = self.entries.len();
        if self.front_len + self.back_len >= capacity {
            return Err(Error::CapacityExceeded {
                capacity,
                required: self.front_len + self.back_len + 1,
            });
        }

        if back {
            self.back_len += 1;
            self.entries[capacity - self.back_len] = entry;
        } else {
            self.entries[self.front_len] = entry;
            self.front_len += 1;
        }
        Ok(())
    }

    fn compute_distances(&mut self, scene: &Scene, view: &Mat4, distance_function: DistanceFunction) {
        let (front, back) = self.partitions_mut();
        for entry in front.iter_mut().chain(back.iter_mut()) {
            if let Some(object) = scene.object(entry.object) {
                entry.distance = distance_function.distance(view, object.world_position());
            }
        }
    }

    fn sort(&mut self, render_order: RenderOrder) {
        let (front, back) = self.partitions_mut();
        // Back entries were written last-to-first; restore emission order so
        // the stable sorts below break full ties by scene order.
        back.reverse();

        match render_order {
            RenderOrder::StateOptimized => {
                front.sort_by(|a, b| key_descending(a, b).then_with(|| near_to_far(a, b)));
            }
            RenderOrder::PixelOptimized => {
                front.sort_by(|a, b| near_to_far(a, b).then_with(|| key_descending(a, b)));
            }
            RenderOrder::BackToFront => {
                front.sort_by(|a, b| far_to_near(a, b).then_with(|| key_descending(a, b)));
            }
        }
        back.sort_by(|a, b| far_to_near(a, b).then_with(|| key_descending(a, b)));
    }

    fn partitions_mut(&mut self) -> (&mut [Entry], &mut [Entry]) {
        let capacity = self.entries.len();
        let (front, rest) = self.entries.split_at_mut(capacity - self.back_len);
        (&mut front[..self.front_len], rest)
    }

    // ===== ITERATION =====

    /// Depth-writing partition (empty under `BackToFront`, which puts
    /// everything here)
    pub fn front_entries(&self) -> &[Entry] {
        &self.entries[..self.front_len]
    }

    /// Blended partition
    pub fn back_entries(&self) -> &[Entry] {
        &self.entries[self.entries.len() - self.back_len..]
    }

    pub fn front_len(&self) -> usize {
        self.front_len
    }

    pub fn back_len(&self) -> usize {
        self.back_len
    }

    /// Total number of entries of the last build
    pub fn len(&self) -> usize {
        self.front_len + self.back_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry at position `index` of the iteration order
    pub fn get(&self, index: usize) -> Option<&Entry> {
        if index < self.front_len {
            Some(&self.entries[index])
        } else if index < self.len() {
            Some(&self.entries[self.entries.len() - self.back_len + (index - self.front_len)])
        } else {
            None
        }
    }

    /// Entries in draw order: front partition, then back partition
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.front_entries().iter().chain(self.back_entries().iter())
    }

    /// Rewind the cursor (done implicitly at the end of `build`)
    pub fn begin_iteration(&mut self) {
        self.cursor = 0;
    }

    pub fn has_more_entries(&self) -> bool {
        self.cursor < self.len()
    }

    /// Next entry in draw order, crossing from front to back partition
    pub fn next_entry(&mut self) -> Option<&Entry> {
        let index = self.cursor;
        if index >= self.len() {
            return None;
        }
        self.cursor += 1;
        self.get(index)
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper bound of the entries a build can emit for `scene`
fn max_entry_count(scene: &Scene) -> usize {
    scene
        .objects()
        .map(|(_, object)| {
            let renderable = usize::from(object.renderable().is_some());
            let text = if object.component::<TextComponent>().is_some() { MAX_TEXT_ENTRIES } else { 0 };
            renderable + text
        })
        .sum()
}

#[cfg(test)]
#[path = "render_queue_tests.rs"]
mod tests;
