/*!
# Pht Engine

Scene graph and render queue core of the Pht engine.

This crate owns the data model between game code and a graphics backend:
a hierarchy of scene objects with local transforms, world-matrix
propagation, per-object components, and a render queue that turns a scene
into a sorted, partitioned draw list. The graphics backend is reached only
through the `Renderer`, `Renderable` and `Material` traits.

## Architecture

- **Transform**: local position/scale/Euler rotation with a change flag
- **SceneObject**: node of the scene graph (transform, flags, layers, components)
- **Scene**: object arena rooted at a single root, camera, light, render passes
- **SceneManager**: named scenes sharing one renderer
- **RenderQueue**: per-pass draw list sorted by state key and camera distance
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;
pub mod scene;

// Main pht namespace module
pub mod pht {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Renderer collaborator trait
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Renderer collaborator sub-module
    pub mod render {
        pub use crate::renderer::*;
    }

    // Scene sub-module (scene graph + render queue)
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
