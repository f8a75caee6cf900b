/// DeviceContext trait - immediate binding of resources on a shader stage

use std::sync::Arc;
use crate::graphics_device::{ShaderStage, Texture, Sampler};

/// Graphics context that owns the per-stage resource tables
///
/// Called from `Shader::bind_texture` / `Shader::bind_sampler` with a valid
/// slot index only.
pub trait DeviceContext {
    /// Attach a texture view at `slot` of `stage`'s resource table
    fn set_shader_resource(&mut self, stage: ShaderStage, slot: u32, texture: &Arc<dyn Texture>);

    /// Attach a sampler at `slot` of `stage`'s sampler table
    fn set_sampler(&mut self, stage: ShaderStage, slot: u32, sampler: &Arc<dyn Sampler>);
}
