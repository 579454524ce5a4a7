use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use super::*;
use crate::renderer::mock_renderer::MockRenderable;
use crate::scene::component::{CameraComponent, LightComponent, ParticleEffectComponent};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_defaults() {
    let object = SceneObject::new();
    assert_eq!(object.name(), ANONYMOUS);
    assert!(object.is_visible());
    assert!(!object.is_static());
    assert_eq!(object.layer_mask(), 0);
    assert!(object.renderable().is_none());
    assert!(object.parent().is_none());
    assert!(object.children().is_empty());
    assert_eq!(*object.world_matrix(), Mat4::IDENTITY);
}

#[test]
fn test_named_and_renderable_constructors() {
    let named = SceneObject::with_name(name_id("board"));
    assert_eq!(named.name(), name_id("board"));

    let drawn = SceneObject::with_renderable(MockRenderable::with_ids(1, 2, 3, true));
    assert_eq!(drawn.name(), ANONYMOUS);
    assert_eq!(drawn.renderable().unwrap().vertex_buffer_id(), 3);
}

#[test]
fn test_name_id_is_stable_and_never_anonymous() {
    assert_eq!(name_id("piece_t"), name_id("piece_t"));
    assert_ne!(name_id("piece_t"), name_id("piece_l"));
    assert_ne!(name_id(""), ANONYMOUS);
}

// ============================================================================
// Layers / flags
// ============================================================================

#[test]
fn test_set_layer_is_single_bit() {
    let mut object = SceneObject::new();
    object.set_layer(0).unwrap();
    assert_eq!(object.layer_mask(), 0b1);
    object.set_layer(5).unwrap();
    assert_eq!(object.layer_mask(), 1 << 5);

    object.set_layer_mask(0b1010);
    assert_eq!(object.layer_mask(), 0b1010);
}

#[test]
fn test_set_layer_rejects_out_of_range_index() {
    let mut object = SceneObject::new();
    object.set_layer(31).unwrap();
    assert_eq!(object.layer_mask(), 1 << 31);

    // Layer 33 must not alias layer 1
    assert!(matches!(object.set_layer(33), Err(Error::InvalidResource(_))));
    assert!(object.set_layer(MAX_LAYERS).is_err());
    assert_eq!(object.layer_mask(), 1 << 31);
}

#[test]
fn test_visibility_and_static_flags() {
    let mut object = SceneObject::new();
    object.set_visible(false);
    object.set_static(true);
    assert!(!object.is_visible());
    assert!(object.is_static());
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_set_component_appends_then_replaces() {
    let mut object = SceneObject::new();
    object.set_component(LightComponent::default());
    object.set_component(ParticleEffectComponent::new(7));
    assert_eq!(object.components().len(), 2);

    let mut brighter = LightComponent::default();
    brighter.intensity = 3.0;
    object.set_component(brighter);

    assert_eq!(object.components().len(), 2);
    assert_eq!(object.component::<LightComponent>().unwrap().intensity, 3.0);
}

#[test]
fn test_component_lookup_by_type() {
    let mut object = SceneObject::new();
    assert!(object.component::<CameraComponent>().is_none());

    object.set_component(ParticleEffectComponent::new(11));
    assert!(object.has_component(ComponentKind::ParticleEffect));
    assert!(!object.has_component(ComponentKind::Camera));

    object.component_mut::<ParticleEffectComponent>().unwrap().emitting = false;
    assert!(!object.component::<ParticleEffectComponent>().unwrap().emitting);

    assert!(object.remove_component::<ParticleEffectComponent>().is_some());
    assert!(object.remove_component::<ParticleEffectComponent>().is_none());
    assert!(object.components().is_empty());
}

// ============================================================================
// Matrix refresh
// ============================================================================

#[test]
fn test_refresh_without_parent_uses_local() {
    let mut object = SceneObject::new();
    object.set_position(Vec3::new(1.0, 2.0, 3.0));
    object.refresh_world_matrix(None);

    assert_eq!(*object.world_matrix(), object.transform().to_matrix());
    assert_eq!(object.world_position(), Vec3::new(1.0, 2.0, 3.0));
    assert!(!object.transform().has_changed());
}

#[test]
fn test_refresh_with_parent_composes() {
    let parent = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let mut object = SceneObject::new();
    object.set_scale(Vec3::splat(2.0));
    object.set_position(Vec3::new(0.0, 1.0, 0.0));
    object.refresh_world_matrix(Some(&parent));

    assert_eq!(*object.world_matrix(), parent * object.transform().to_matrix());
    assert_eq!(object.world_position(), Vec3::new(10.0, 1.0, 0.0));
}

// ============================================================================
// Child links
// ============================================================================

#[test]
fn test_child_links() {
    let mut keys: SlotMap<SceneObjectKey, ()> = SlotMap::with_key();
    let a = keys.insert(());
    let b = keys.insert(());

    let mut object = SceneObject::new();
    object.push_child(a);
    object.push_child(b);
    assert_eq!(object.children(), &[a, b]);

    assert!(object.remove_child(a));
    assert!(!object.remove_child(a));
    assert_eq!(object.children(), &[b]);

    assert_eq!(object.take_children(), vec![b]);
    assert!(object.children().is_empty());
}
