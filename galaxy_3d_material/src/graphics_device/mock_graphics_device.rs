/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Provides a device that counts the resources it creates, a device context
/// that records every bind call, and a shader stage that counts its
/// name→slot lookups.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::error::Galaxy3dResult;
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, DeviceContext, Shader, ReflectedShader, BindSlot, ShaderStage,
    Texture, TextureDesc, TextureInfo, Sampler, SamplerDesc,
};

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub data_len: usize,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Sampler
// ============================================================================

#[derive(Debug)]
pub struct MockSampler {
    pub desc: SamplerDesc,
}

impl Sampler for MockSampler {
    fn desc(&self) -> &SamplerDesc {
        &self.desc
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub textures_created: usize,
    pub samplers_created: usize,
    pub fail_textures: bool,
    pub fail_samplers: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Galaxy3dResult<Arc<dyn Texture>> {
        if self.fail_textures {
            engine_bail!("galaxy3d::MockGraphicsDevice", "Texture creation disabled");
        }
        self.textures_created += 1;
        Ok(Arc::new(MockTexture {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
            },
            data_len: desc.data.len(),
        }))
    }

    fn create_sampler(&mut self, desc: &SamplerDesc) -> Galaxy3dResult<Arc<dyn Sampler>> {
        if self.fail_samplers {
            engine_bail!("galaxy3d::MockGraphicsDevice", "Sampler creation disabled");
        }
        self.samplers_created += 1;
        Ok(Arc::new(MockSampler { desc: *desc }))
    }
}

// ============================================================================
// Mock DeviceContext
// ============================================================================

/// A bind call recorded by MockDeviceContext
#[derive(Clone)]
pub enum MockBinding {
    Texture {
        stage: ShaderStage,
        slot: u32,
        texture: Arc<dyn Texture>,
    },
    Sampler {
        stage: ShaderStage,
        slot: u32,
        sampler: Arc<dyn Sampler>,
    },
}

#[derive(Default)]
pub struct MockDeviceContext {
    pub bindings: Vec<MockBinding>,
}

impl MockDeviceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// (stage, slot) of every texture bind, in call order
    pub fn texture_binds(&self) -> Vec<(ShaderStage, u32)> {
        self.bindings
            .iter()
            .filter_map(|b| match b {
                MockBinding::Texture { stage, slot, .. } => Some((*stage, *slot)),
                MockBinding::Sampler { .. } => None,
            })
            .collect()
    }

    /// (stage, slot) of every sampler bind, in call order
    pub fn sampler_binds(&self) -> Vec<(ShaderStage, u32)> {
        self.bindings
            .iter()
            .filter_map(|b| match b {
                MockBinding::Sampler { stage, slot, .. } => Some((*stage, *slot)),
                MockBinding::Texture { .. } => None,
            })
            .collect()
    }

    /// Sampler objects bound, in call order
    pub fn bound_samplers(&self) -> Vec<Arc<dyn Sampler>> {
        self.bindings
            .iter()
            .filter_map(|b| match b {
                MockBinding::Sampler { sampler, .. } => Some(sampler.clone()),
                MockBinding::Texture { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl DeviceContext for MockDeviceContext {
    fn set_shader_resource(&mut self, stage: ShaderStage, slot: u32, texture: &Arc<dyn Texture>) {
        self.bindings.push(MockBinding::Texture {
            stage,
            slot,
            texture: texture.clone(),
        });
    }

    fn set_sampler(&mut self, stage: ShaderStage, slot: u32, sampler: &Arc<dyn Sampler>) {
        self.bindings.push(MockBinding::Sampler {
            stage,
            slot,
            sampler: sampler.clone(),
        });
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

/// Reflection-table shader that counts name lookups
pub struct MockShader {
    pub inner: ReflectedShader,
    pub lookups: AtomicUsize,
}

impl MockShader {
    pub fn new(inner: ReflectedShader) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.inner.stage()
    }

    fn is_null(&self) -> bool {
        self.inner.is_null()
    }

    fn texture_bind_slot(&self, name: &str) -> BindSlot {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.texture_bind_slot(name)
    }

    fn sampler_bind_slot(&self, name: &str) -> BindSlot {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.sampler_bind_slot(name)
    }
}
