/*!
# Galaxy 3D Material

Material variable binding for the Galaxy3D rendering engine.

This crate owns the GPU-facing resources of a Phong material (texture views,
pooled samplers, scalar parameters), resolves where those resources must be
bound for an arbitrary shader pass, and lazily copies changed scalar state into
a GPU-visible uniform record.

## Architecture

- **GraphicsDevice / DeviceContext / Shader / ShaderPass**: collaborator traits
  implemented by the backend (resource creation, bind primitives, reflection)
- **PhongMaterial**: shared, observable material description
- **TextureView / SamplerHandle / SamplerStatePool**: resource lifecycle
- **ResourceSlotStore**: fixed-capacity texture and sampler slots
- **BindSlotResolver**: per-pass bind index cache
- **PhongMaterialVariables**: the per-drawable binder and uniform assigner

Everything runs on the thread that owns the graphics context, once per draw
call.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod material;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Galaxy3dError, Galaxy3dResult};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics device collaborator traits
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Material binding engine
    pub mod material {
        pub use crate::material::*;
    }
}

// Re-export math library at crate root
pub use glam;
