/// Component slots of a scene object.
///
/// The set of component kinds is closed, so components are an enum rather
/// than a type-erased registry. `ComponentType` gives typed access:
///
/// ```ignore
/// object.set_component(LightComponent::default());
/// let light = object.component::<LightComponent>();
/// ```

use glam::{Mat4, Vec3};
use super::text::TextComponent;

/// Discriminant of a component, one slot per kind per object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Camera,
    Light,
    Text,
    ParticleEffect,
}

// ===== CAMERA =====

/// Camera projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Right-handed perspective, vertical field of view in degrees
    Perspective { fov_y: f32, aspect: f32, near: f32, far: f32 },
    /// Right-handed orthographic box
    Orthographic { left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32 },
}

/// Camera attached to a scene object.
///
/// The view matrix is the inverse of the owning object's world matrix;
/// the component only stores the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraComponent {
    projection: Projection,
}

impl CameraComponent {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Projection matrix (perspective or orthographic, right-handed)
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y, aspect, near, far } => {
                Mat4::perspective_rh(fov_y.to_radians(), aspect, near, far)
            }
            Projection::Orthographic { left, right, bottom, top, near, far } => {
                Mat4::orthographic_rh(left, right, bottom, top, near, far)
            }
        }
    }

    /// View matrix for a camera object with the given world matrix
    pub fn view_matrix(world_matrix: &Mat4) -> Mat4 {
        world_matrix.inverse()
    }
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self::new(Projection::Perspective { fov_y: 60.0, aspect: 9.0 / 16.0, near: 0.1, far: 100.0 })
    }
}

// ===== LIGHT =====

/// Directional light shared by the whole scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightComponent {
    /// Direction the light travels, world space
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub ambient: Vec3,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, -1.0).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
            ambient: Vec3::splat(0.2),
        }
    }
}

// ===== PARTICLE EFFECT =====

/// Handle to a particle effect simulated outside the scene graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleEffectComponent {
    /// Effect definition id (hash of the effect name)
    pub effect_id: u32,
    pub emitting: bool,
    pub time_scale: f32,
}

impl ParticleEffectComponent {
    pub fn new(effect_id: u32) -> Self {
        Self { effect_id, emitting: true, time_scale: 1.0 }
    }
}

// ===== COMPONENT ENUM =====

/// A component stored on a scene object
#[derive(Debug, Clone)]
pub enum Component {
    Camera(CameraComponent),
    Light(LightComponent),
    Text(TextComponent),
    ParticleEffect(ParticleEffectComponent),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Camera(_) => ComponentKind::Camera,
            Component::Light(_) => ComponentKind::Light,
            Component::Text(_) => ComponentKind::Text,
            Component::ParticleEffect(_) => ComponentKind::ParticleEffect,
        }
    }
}

/// Typed access to one variant of `Component`
pub trait ComponentType: Into<Component> {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! impl_component_type {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::$variant(value)
            }
        }

        impl ComponentType for $ty {
            const KIND: ComponentKind = ComponentKind::$variant;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_component_type!(CameraComponent, Camera);
impl_component_type!(LightComponent, Light);
impl_component_type!(TextComponent, Text);
impl_component_type!(ParticleEffectComponent, ParticleEffect);

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
