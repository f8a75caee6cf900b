/// Bind-slot resolver: semantic slot → bind index per stage, cached per pass
///
/// Name lookups go through the shader's reflection tables and are only done
/// when a pass is resolved for the first time. The cache holds
/// `capacity` passes in most-recently-used order; with the default capacity of
/// one, alternating between two passes rebuilds on every call.

use std::collections::VecDeque;
use crate::graphics_device::{BindSlot, ShaderPass, ShaderPassId, ShaderStage, NUM_SHADER_STAGES};
use crate::material::config::ShaderResourceNames;
use crate::material::slots::{PerSamplerSlot, PerTextureSlot, SamplerSlot, TextureSlot};
use crate::engine_trace;

// ============================================================================
// Cache entry
// ============================================================================

/// Bind indices of one pass, per stage kind
#[derive(Debug, Clone)]
pub struct BindSlotCache {
    pass: ShaderPassId,
    textures: [PerTextureSlot<BindSlot>; NUM_SHADER_STAGES],
    samplers: [PerSamplerSlot<BindSlot>; NUM_SHADER_STAGES],
}

impl BindSlotCache {
    /// Resolve every slot name against every eligible stage of `pass`
    ///
    /// Null stages and stages that cannot bind textures keep the sentinel.
    pub fn build(pass: &ShaderPass, names: &ShaderResourceNames) -> Self {
        let mut textures = [PerTextureSlot::<BindSlot>::default(); NUM_SHADER_STAGES];
        let mut samplers = [PerSamplerSlot::<BindSlot>::default(); NUM_SHADER_STAGES];

        for shader in pass.shaders() {
            if shader.is_null() || !shader.stage().can_bind_textures() {
                continue;
            }
            let stage = shader.stage().index();
            for slot in TextureSlot::ALL {
                textures[stage][slot] = shader.texture_bind_slot(&names.textures[slot]);
            }
            for slot in SamplerSlot::ALL {
                samplers[stage][slot] = shader.sampler_bind_slot(&names.samplers[slot]);
            }
        }

        Self {
            pass: pass.id(),
            textures,
            samplers,
        }
    }

    /// Pass this cache was built for
    pub fn pass(&self) -> ShaderPassId {
        self.pass
    }

    pub fn texture_slot(&self, stage: ShaderStage, slot: TextureSlot) -> BindSlot {
        self.textures[stage.index()][slot]
    }

    pub fn sampler_slot(&self, stage: ShaderStage, slot: SamplerSlot) -> BindSlot {
        self.samplers[stage.index()][slot]
    }
}

// ============================================================================
// Resolver
// ============================================================================

pub struct BindSlotResolver {
    names: ShaderResourceNames,
    capacity: usize,
    /// Most recently used first
    entries: VecDeque<BindSlotCache>,
    rebuilds: u64,
}

impl BindSlotResolver {
    /// Create a resolver caching up to `capacity` passes (at least one)
    pub fn new(names: ShaderResourceNames, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            names,
            capacity,
            entries: VecDeque::with_capacity(capacity),
            rebuilds: 0,
        }
    }

    /// Bind indices for `pass`, resolving them if the pass is not cached
    pub fn ensure_resolved(&mut self, pass: &ShaderPass) -> &BindSlotCache {
        match self.entries.iter().position(|entry| entry.pass == pass.id()) {
            Some(0) => {}
            Some(pos) => {
                if let Some(entry) = self.entries.remove(pos) {
                    self.entries.push_front(entry);
                }
            }
            None => {
                engine_trace!(
                    "galaxy3d::BindSlotResolver",
                    "Resolving bind slots for pass '{}' ({:?})",
                    pass.name(),
                    pass.id()
                );
                self.entries.push_front(BindSlotCache::build(pass, &self.names));
                self.entries.truncate(self.capacity);
                self.rebuilds += 1;
            }
        }
        &self.entries[0]
    }

    /// Most recently resolved entry
    pub fn current(&self) -> Option<&BindSlotCache> {
        self.entries.front()
    }

    /// Whether `pass` is the most recently resolved pass
    pub fn is_resolved_for(&self, pass: &ShaderPass) -> bool {
        self.current().is_some_and(|entry| entry.pass == pass.id())
    }

    /// Number of cache builds so far
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Forget every cached pass
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn names(&self) -> &ShaderResourceNames {
        &self.names
    }
}

#[cfg(test)]
#[path = "bind_slot_resolver_tests.rs"]
mod tests;
