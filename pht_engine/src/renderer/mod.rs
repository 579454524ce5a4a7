//! Renderer module - the collaborator interface the scene graph consumes
//!
//! The scene graph never talks to a graphics API directly. It asks a
//! `Renderer` for renderables and static batches, and reads the sort-key
//! identities back through the `Renderable` and `Material` traits.

pub mod renderer;
pub mod renderable;
pub mod material;

#[cfg(test)]
pub(crate) mod mock_renderer;

pub use renderer::*;
pub use renderable::*;
pub use material::*;
