/// Graphics device module - collaborator traits the material engine binds through
///
/// The backend implements these traits; the material engine only consumes them.

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod sampler;
pub mod shader;
pub mod shader_pass;
pub mod device_context;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use sampler::*;
pub use shader::*;
pub use shader_pass::*;
pub use device_context::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
