/// Material binding configuration
///
/// Shader-side resource names are configurable so the same engine can drive
/// shader libraries with different naming conventions.

use crate::graphics_device::SamplerDesc;
use crate::material::slots::{PerTextureSlot, PerSamplerSlot, TextureSlot, SamplerSlot};

/// Shader-side names of the material's textures and samplers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderResourceNames {
    /// Shader resource name per texture slot
    pub textures: PerTextureSlot<String>,
    /// Sampler name per sampler slot
    pub samplers: PerSamplerSlot<String>,
}

impl Default for ShaderResourceNames {
    fn default() -> Self {
        Self {
            textures: PerTextureSlot::from_fn(|slot| String::from(match slot {
                TextureSlot::Diffuse => "texDiffuseMap",
                TextureSlot::AlphaMask => "texAlphaMap",
                TextureSlot::Normal => "texNormalMap",
                TextureSlot::Displacement => "texDisplacementMap",
            })),
            samplers: PerSamplerSlot::from_fn(|slot| String::from(match slot {
                SamplerSlot::Diffuse => "samplerDiffuse",
                SamplerSlot::AlphaMask => "samplerAlpha",
                SamplerSlot::Normal => "samplerNormal",
                SamplerSlot::Displacement => "samplerDisplace",
                SamplerSlot::Shadow => "samplerShadow",
            })),
        }
    }
}

/// PhongMaterialVariables configuration
#[derive(Debug, Clone)]
pub struct MaterialVariablesConfig {
    /// Shader-side resource names
    pub names: ShaderResourceNames,
    /// Sampler registered for the shadow map slot
    pub shadow_sampler: SamplerDesc,
    /// Number of shader passes whose bind slots are cached (minimum 1)
    ///
    /// With 1, alternating between passes re-resolves on every bind.
    pub bind_slot_cache_capacity: usize,
}

impl Default for MaterialVariablesConfig {
    fn default() -> Self {
        Self {
            names: ShaderResourceNames::default(),
            shadow_sampler: SamplerDesc::SHADOW,
            bind_slot_cache_capacity: 1,
        }
    }
}
