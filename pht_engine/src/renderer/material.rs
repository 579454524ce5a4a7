/// Material trait and material descriptor

/// Descriptor for creating a material
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    /// Debug name
    pub name: String,
    /// Shader program the material draws with
    pub shader_id: u32,
    /// Whether draws with this material write the depth buffer
    pub depth_write: bool,
    /// Whether draws with this material test against the depth buffer
    pub depth_test: bool,
    /// Texture names bound by the material (resolved by the backend)
    pub textures: Vec<String>,
}

impl MaterialDesc {
    /// Opaque material: depth test and depth write enabled, no textures
    pub fn opaque(name: &str, shader_id: u32) -> Self {
        Self {
            name: name.to_string(),
            shader_id,
            depth_write: true,
            depth_test: true,
            textures: Vec::new(),
        }
    }

    /// Blended material: depth test enabled, depth write disabled
    pub fn blended(name: &str, shader_id: u32) -> Self {
        Self {
            depth_write: false,
            ..Self::opaque(name, shader_id)
        }
    }
}

/// Read-only material introspection
///
/// The render queue uses these values verbatim as sort-key components.
/// Implemented by backend material types.
pub trait Material: Send + Sync {
    /// Depth-write state of the material
    fn depth_write(&self) -> bool;

    /// Shader program identifier
    fn shader_id(&self) -> u32;

    /// Stable identity of this material instance
    fn material_id(&self) -> u32;
}
