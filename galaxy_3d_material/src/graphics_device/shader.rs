/// Shader stage trait, stage kinds and bind slots
///
/// A `Shader` is one stage of a shader pass. It exposes the name→bind-slot
/// tables produced by reflection and the primitive bind operations. Binding at
/// `BindSlot::NONE` is always a no-op.

use std::sync::Arc;
use bitflags::bitflags;
use rustc_hash::FxHashMap;
use crate::graphics_device::{DeviceContext, Texture, Sampler};

/// Number of pipeline stage kinds
pub const NUM_SHADER_STAGES: usize = 6;

/// Pipeline stage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Hull,
    Domain,
    Geometry,
    Pixel,
    Compute,
}

impl ShaderStage {
    /// All stage kinds, in pipeline order
    pub const ALL: [ShaderStage; NUM_SHADER_STAGES] = [
        ShaderStage::Vertex,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Geometry,
        ShaderStage::Pixel,
        ShaderStage::Compute,
    ];

    /// Dense index in `0..NUM_SHADER_STAGES`
    pub fn index(&self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::Hull => 1,
            ShaderStage::Domain => 2,
            ShaderStage::Geometry => 3,
            ShaderStage::Pixel => 4,
            ShaderStage::Compute => 5,
        }
    }

    /// Single-bit flag for this stage
    pub fn flag(&self) -> ShaderStageFlags {
        match self {
            ShaderStage::Vertex => ShaderStageFlags::VERTEX,
            ShaderStage::Hull => ShaderStageFlags::HULL,
            ShaderStage::Domain => ShaderStageFlags::DOMAIN,
            ShaderStage::Geometry => ShaderStageFlags::GEOMETRY,
            ShaderStage::Pixel => ShaderStageFlags::PIXEL,
            ShaderStage::Compute => ShaderStageFlags::COMPUTE,
        }
    }

    /// Whether material textures may be bound on this stage
    pub fn can_bind_textures(&self) -> bool {
        ShaderStageFlags::TEXTURE_CAPABLE.contains(self.flag())
    }
}

bitflags! {
    /// Shader stage mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = 1 << 0;
        const HULL = 1 << 1;
        const DOMAIN = 1 << 2;
        const GEOMETRY = 1 << 3;
        const PIXEL = 1 << 4;
        const COMPUTE = 1 << 5;

        /// Graphics stages that sample material textures
        const TEXTURE_CAPABLE = Self::VERTEX.bits()
            | Self::HULL.bits()
            | Self::DOMAIN.bits()
            | Self::GEOMETRY.bits()
            | Self::PIXEL.bits();
    }
}

// ============================================================================
// Bind slot
// ============================================================================

/// Index in a stage's resource or sampler table, or `NONE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindSlot(u32);

impl BindSlot {
    /// Sentinel: the resource is not present in this pass
    pub const NONE: Self = Self(u32::MAX);

    /// Valid bind slot at `index`
    pub fn new(index: u32) -> Self {
        debug_assert!(index != u32::MAX, "bind slot index collides with the sentinel");
        Self(index)
    }

    /// The bind index, or None for the sentinel
    pub fn index(&self) -> Option<u32> {
        if self.is_valid() { Some(self.0) } else { None }
    }

    /// Whether this is a real bind index
    pub fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for BindSlot {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Option<u32>> for BindSlot {
    /// Reflected index; None and `u32::MAX` both map to `NONE`
    fn from(index: Option<u32>) -> Self {
        match index {
            Some(index) if index != u32::MAX => Self(index),
            _ => Self::NONE,
        }
    }
}

// ============================================================================
// Shader trait
// ============================================================================

/// One stage of a shader pass
///
/// Implemented by the backend from shader reflection data.
pub trait Shader: Send + Sync {
    /// Stage kind
    fn stage(&self) -> ShaderStage;

    /// Whether this is an inactive placeholder stage
    fn is_null(&self) -> bool {
        false
    }

    /// Bind slot of the shader resource named `name`
    fn texture_bind_slot(&self, name: &str) -> BindSlot;

    /// Bind slot of the sampler named `name`
    fn sampler_bind_slot(&self, name: &str) -> BindSlot;

    /// Bind a texture at `slot` on this stage (no-op for `BindSlot::NONE`)
    fn bind_texture(&self, ctx: &mut dyn DeviceContext, slot: BindSlot, texture: &Arc<dyn Texture>) {
        if let Some(index) = slot.index() {
            ctx.set_shader_resource(self.stage(), index, texture);
        }
    }

    /// Bind a sampler at `slot` on this stage (no-op for `BindSlot::NONE`)
    fn bind_sampler(&self, ctx: &mut dyn DeviceContext, slot: BindSlot, sampler: &Arc<dyn Sampler>) {
        if let Some(index) = slot.index() {
            ctx.set_sampler(self.stage(), index, sampler);
        }
    }
}

// ============================================================================
// Reflection-table shader
// ============================================================================

/// Shader stage backed by plain name→slot tables
///
/// Backends fill the tables from their reflection data; a null stage
/// (`ReflectedShader::null`) resolves nothing and is skipped by binders.
#[derive(Debug, Clone)]
pub struct ReflectedShader {
    stage: ShaderStage,
    null: bool,
    textures: FxHashMap<String, u32>,
    samplers: FxHashMap<String, u32>,
}

impl ReflectedShader {
    /// Create an active stage with empty tables
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            null: false,
            textures: FxHashMap::default(),
            samplers: FxHashMap::default(),
        }
    }

    /// Create an inactive placeholder stage
    pub fn null(stage: ShaderStage) -> Self {
        Self {
            null: true,
            ..Self::new(stage)
        }
    }

    /// Add a shader resource binding
    pub fn with_texture(mut self, name: impl Into<String>, slot: u32) -> Self {
        self.textures.insert(name.into(), slot);
        self
    }

    /// Add a sampler binding
    pub fn with_sampler(mut self, name: impl Into<String>, slot: u32) -> Self {
        self.samplers.insert(name.into(), slot);
        self
    }

    /// Number of shader resource bindings
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of sampler bindings
    pub fn sampler_count(&self) -> usize {
        self.samplers.len()
    }
}

impl Shader for ReflectedShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn is_null(&self) -> bool {
        self.null
    }

    fn texture_bind_slot(&self, name: &str) -> BindSlot {
        self.textures.get(name).copied().into()
    }

    fn sampler_bind_slot(&self, name: &str) -> BindSlot {
        self.samplers.get(name).copied().into()
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
