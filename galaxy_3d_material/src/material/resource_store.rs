/// Resource slot store: one texture view per texture slot, one sampler handle
/// per sampler slot
///
/// Both arrays are allocated once and mutated in place; an empty slot holds an
/// empty view or handle.

use std::sync::{Arc, Mutex};
use crate::graphics_device::{GraphicsDevice, SamplerDesc};
use crate::material::phong_material::TextureSource;
use crate::material::sampler_pool::{SamplerHandle, StatePool};
use crate::material::slots::{PerSamplerSlot, PerTextureSlot, SamplerSlot, TextureSlot};
use crate::material::texture_view::TextureView;
use crate::engine_warn;

pub struct ResourceSlotStore {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    state_pool: Arc<dyn StatePool>,
    textures: PerTextureSlot<TextureView>,
    samplers: PerSamplerSlot<SamplerHandle>,
}

impl ResourceSlotStore {
    /// Create a store with every slot empty
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, state_pool: Arc<dyn StatePool>) -> Self {
        Self {
            device,
            state_pool,
            textures: PerTextureSlot::default(),
            samplers: PerSamplerSlot::default(),
        }
    }

    /// Create or replace the view of `slot`, or clear it when `source` is None
    ///
    /// Returns whether the slot holds a texture afterwards.
    pub fn set_texture(&mut self, slot: TextureSlot, source: Option<&TextureSource>) -> bool {
        self.textures[slot].create_view(&self.device, source)
    }

    /// Register a sampler for `slot`, releasing the previous one first
    ///
    /// A failed registration leaves the slot empty.
    pub fn set_sampler(&mut self, slot: SamplerSlot, desc: &SamplerDesc) -> bool {
        self.samplers[slot].release();
        match self.state_pool.register(desc) {
            Ok(handle) => {
                self.samplers[slot] = handle;
                true
            }
            Err(e) => {
                engine_warn!("galaxy3d::ResourceSlotStore", "Sampler {:?} left empty: {}", slot, e);
                false
            }
        }
    }

    pub fn release_sampler(&mut self, slot: SamplerSlot) {
        self.samplers[slot].release();
    }

    pub fn texture(&self, slot: TextureSlot) -> &TextureView {
        &self.textures[slot]
    }

    pub fn sampler(&self, slot: SamplerSlot) -> &SamplerHandle {
        &self.samplers[slot]
    }

    pub fn has_texture(&self, slot: TextureSlot) -> bool {
        self.textures[slot].has_view()
    }

    /// Whether at least one texture slot holds a view
    pub fn has_any_texture(&self) -> bool {
        self.textures.values().any(TextureView::has_view)
    }

    /// Empty every texture slot and release every sampler
    pub fn clear(&mut self) {
        for view in self.textures.values_mut() {
            view.release();
        }
        for handle in self.samplers.values_mut() {
            handle.release();
        }
    }
}

#[cfg(test)]
#[path = "resource_store_tests.rs"]
mod tests;
