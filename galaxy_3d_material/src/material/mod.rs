/// Material module - Phong material binding engine
///
/// Leaves first: slots and configuration, the observable material, resource
/// lifecycle (texture views, pooled samplers), the slot store, the bind-slot
/// resolver, the uniform record, and the per-drawable binder.

// Module declarations
pub mod slots;
pub mod config;
pub mod phong_material;
pub mod texture_view;
pub mod sampler_pool;
pub mod resource_store;
pub mod bind_slot_resolver;
pub mod uniforms;
pub mod phong_material_variables;

// Re-export from modules
pub use slots::*;
pub use config::*;
pub use phong_material::*;
pub use texture_view::*;
pub use sampler_pool::*;
pub use resource_store::*;
pub use bind_slot_resolver::*;
pub use uniforms::PhongMaterialUniforms;
pub use phong_material_variables::*;
