//! Scene module
//!
//! Provides the scene graph (transforms, scene objects, components), the
//! scene manager, render passes and the render queue that turns a scene
//! into a sorted draw list.

mod transform;
mod component;
mod text;
mod scene_object;
mod render_pass;
mod scene;
mod scene_manager;
mod render_queue;

pub use transform::Transform;
pub use component::{
    CameraComponent, Component, ComponentKind, ComponentType,
    LightComponent, ParticleEffectComponent, Projection,
};
pub use text::{TextAlignment, TextComponent, TextEffects, TextKind, TextProperties};
pub use scene_object::{name_id, SceneObject, SceneObjectKey, ANONYMOUS};
pub use render_pass::{layer_bit, DistanceFunction, RenderOrder, RenderPassDesc, MAX_LAYERS};
pub use scene::{Scene, SceneDesc, TextHandle};
pub use scene_manager::SceneManager;
pub use render_queue::{Entry, EntrySource, RenderQueue, SortKey, MAX_TEXT_ENTRIES};
