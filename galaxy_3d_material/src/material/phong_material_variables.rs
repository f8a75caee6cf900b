/// PhongMaterialVariables - per-drawable material binder and uniform assigner
///
/// Owns the GPU-facing resources of one attached `PhongMaterial`, keeps them in
/// sync with the material's change events, binds them for whatever shader pass
/// the renderer is using, and copies scalar state into `PhongMaterialUniforms`
/// when it changed.
///
/// Called once per draw call, on the thread that owns the graphics context.
/// Material edits mark the binder dirty and raise the invalidate handlers from
/// inside the material setter; the GPU resources they affect are re-derived at
/// the next bind or update.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use rustc_hash::FxHashSet;
use crate::graphics_device::{DeviceContext, GraphicsDevice, ShaderPass, ShaderStage};
use crate::material::bind_slot_resolver::BindSlotResolver;
use crate::material::config::MaterialVariablesConfig;
use crate::material::phong_material::{MaterialChange, MaterialSubscription, PhongMaterial};
use crate::material::resource_store::ResourceSlotStore;
use crate::material::sampler_pool::StatePool;
use crate::material::slots::{SamplerSlot, TextureSlot};
use crate::material::uniforms::{flag, PhongMaterialUniforms};
use crate::{engine_debug, engine_trace};

const LOG_SOURCE: &str = "galaxy3d::PhongMaterialVariables";

// ============================================================================
// Render toggles
// ============================================================================

/// Per-drawable switches for the material's maps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderToggles {
    pub diffuse_map: bool,
    pub diffuse_alpha_map: bool,
    pub normal_map: bool,
    pub displacement_map: bool,
    /// Receive shadows (binds the shadow sampler)
    pub shadow_map: bool,
    /// Receive environment reflections
    pub environment_map: bool,
}

impl RenderToggles {
    /// Toggle of the map in `slot`
    pub fn map(&self, slot: TextureSlot) -> bool {
        match slot {
            TextureSlot::Diffuse => self.diffuse_map,
            TextureSlot::AlphaMask => self.diffuse_alpha_map,
            TextureSlot::Normal => self.normal_map,
            TextureSlot::Displacement => self.displacement_map,
        }
    }

    fn map_mut(&mut self, slot: TextureSlot) -> &mut bool {
        match slot {
            TextureSlot::Diffuse => &mut self.diffuse_map,
            TextureSlot::AlphaMask => &mut self.diffuse_alpha_map,
            TextureSlot::Normal => &mut self.normal_map,
            TextureSlot::Displacement => &mut self.displacement_map,
        }
    }
}

impl Default for RenderToggles {
    fn default() -> Self {
        Self {
            diffuse_map: true,
            diffuse_alpha_map: true,
            normal_map: true,
            displacement_map: true,
            shadow_map: false,
            environment_map: false,
        }
    }
}

// ============================================================================
// PhongMaterialVariables
// ============================================================================

type InvalidateHandler = Box<dyn FnMut() + Send>;

/// Dirty flag and redraw handlers, shared with the material subscription
struct InvalidationSignal {
    dirty: AtomicBool,
    handlers: Mutex<Vec<InvalidateHandler>>,
}

impl InvalidationSignal {
    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    fn raise(&self) {
        let mut handlers = match self.handlers.try_lock() {
            Ok(handlers) => handlers,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            // A raise is already running (reentrant or on another thread)
            Err(TryLockError::WouldBlock) => return,
        };
        for handler in handlers.iter_mut() {
            handler();
        }
    }

    fn invalidate(&self) {
        self.mark_dirty();
        self.raise();
    }
}

pub struct PhongMaterialVariables {
    config: MaterialVariablesConfig,
    store: ResourceSlotStore,
    resolver: BindSlotResolver,
    material: Option<PhongMaterial>,
    subscription: Option<MaterialSubscription>,
    toggles: RenderToggles,
    signal: Arc<InvalidationSignal>,
}

impl PhongMaterialVariables {
    /// Create a binder with no material attached
    ///
    /// # Arguments
    ///
    /// * `device` - Device used to create texture views
    /// * `state_pool` - Pool samplers are registered with
    /// * `config` - Shader resource names, shadow sampler, resolver capacity
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        state_pool: Arc<dyn StatePool>,
        config: MaterialVariablesConfig,
    ) -> Self {
        let resolver = BindSlotResolver::new(config.names.clone(), config.bind_slot_cache_capacity);
        Self {
            store: ResourceSlotStore::new(device, state_pool),
            resolver,
            config,
            material: None,
            subscription: None,
            toggles: RenderToggles::default(),
            signal: Arc::new(InvalidationSignal {
                dirty: AtomicBool::new(true),
                handlers: Mutex::new(Vec::new()),
            }),
        }
    }

    // ===== MATERIAL =====

    /// Attach `material`, or detach with None
    ///
    /// The previous material's subscription is dropped first. Attaching creates
    /// every texture view and sampler from the material; detaching empties them.
    /// Re-attaching the current material does nothing.
    pub fn set_material(&mut self, material: Option<PhongMaterial>) {
        let unchanged = match (&self.material, &material) {
            (Some(current), Some(new)) => current.ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        self.subscription = None;
        self.material = material;

        match &self.material {
            Some(material) => {
                let signal = self.signal.clone();
                self.subscription = Some(material.subscribe_with(move |_| signal.invalidate()));
                let state = material.snapshot();
                for slot in TextureSlot::ALL {
                    self.store.set_texture(slot, state.texture_source(slot));
                    self.store.set_sampler(slot.sampler_slot(), state.map_sampler(slot));
                }
                self.store.set_sampler(SamplerSlot::Shadow, &self.config.shadow_sampler);
                engine_debug!(
                    LOG_SOURCE,
                    "Material attached ({} texture(s))",
                    TextureSlot::ALL.iter().filter(|slot| self.store.has_texture(**slot)).count()
                );
            }
            None => {
                self.store.clear();
                engine_debug!(LOG_SOURCE, "Material detached");
            }
        }

        self.signal.invalidate();
    }

    /// Attached material
    pub fn material(&self) -> Option<&PhongMaterial> {
        self.material.as_ref()
    }

    /// Apply every pending material change event
    ///
    /// Repeated events for the same field are applied once, against the
    /// material's current state. Each event re-derives exactly the one resource
    /// its field maps to. Also called at the start of `bind_material_textures`
    /// and `update_material_variables`. Returns the number of distinct events
    /// applied.
    pub fn poll_material_changes(&mut self) -> usize {
        let changes: Vec<MaterialChange> = match &self.subscription {
            Some(subscription) => {
                let mut seen = FxHashSet::default();
                subscription.drain().filter(|change| seen.insert(*change)).collect()
            }
            None => return 0,
        };
        for change in &changes {
            self.apply_change(*change);
        }
        changes.len()
    }

    fn apply_change(&mut self, change: MaterialChange) {
        self.signal.mark_dirty();
        let Some(material) = &self.material else {
            return;
        };

        if let Some(slot) = change.map_source() {
            let source = material.state().texture_source(slot).cloned();
            self.store.set_texture(slot, source.as_ref());
        } else if let Some(slot) = change.map_sampler() {
            let desc = *material.state().map_sampler(slot);
            self.store.set_sampler(slot.sampler_slot(), &desc);
        }

        engine_trace!(LOG_SOURCE, "Applied {:?}", change);
    }

    // ===== BINDING =====

    /// Bind the material's textures and samplers for `pass`
    ///
    /// Returns false when no material is attached (nothing to bind).
    pub fn bind_material_textures(&mut self, ctx: &mut dyn DeviceContext, pass: &ShaderPass) -> bool {
        self.poll_material_changes();
        if self.material.is_none() {
            return false;
        }

        let cache = self.resolver.ensure_resolved(pass);

        if self.store.has_any_texture() {
            for shader in pass.shaders() {
                if shader.is_null() || !shader.stage().can_bind_textures() {
                    continue;
                }
                let stage = shader.stage();
                for slot in TextureSlot::ALL {
                    let Some(texture) = self.store.texture(slot).texture() else {
                        continue;
                    };
                    shader.bind_texture(ctx, cache.texture_slot(stage, slot), texture);
                    if let Some(sampler) = self.store.sampler(slot.sampler_slot()).sampler() {
                        shader.bind_sampler(ctx, cache.sampler_slot(stage, slot.sampler_slot()), sampler);
                    }
                }
            }
        }

        if self.toggles.shadow_map {
            let pixel = pass.shader(ShaderStage::Pixel).filter(|shader| !shader.is_null());
            if let (Some(shader), Some(sampler)) = (pixel, self.store.sampler(SamplerSlot::Shadow).sampler()) {
                let slot = cache.sampler_slot(ShaderStage::Pixel, SamplerSlot::Shadow);
                shader.bind_sampler(ctx, slot, sampler);
            }
        }

        true
    }

    // ===== UNIFORMS =====

    /// Copy the material's state into `uniforms` if it changed
    ///
    /// Returns true when `uniforms` was written. False when no material is
    /// attached or nothing changed since the last copy; `uniforms` is then left
    /// untouched.
    pub fn update_material_variables(&mut self, uniforms: &mut PhongMaterialUniforms) -> bool {
        self.poll_material_changes();
        let Some(material) = &self.material else {
            return false;
        };
        if !self.signal.take_dirty() {
            return false;
        }

        let state = material.state();
        uniforms.ambient = state.ambient_color.to_array();
        uniforms.diffuse = state.diffuse_color.to_array();
        uniforms.emissive = state.emissive_color.to_array();
        uniforms.reflect = state.reflective_color.to_array();
        uniforms.specular = state.specular_color.to_array();
        uniforms.shininess = state.specular_shininess;
        uniforms.displacement_map_scale_mask = state.displacement_map_scale_mask.to_array();

        let has_map = |slot: TextureSlot| flag(self.toggles.map(slot) && self.store.has_texture(slot));
        uniforms.has_diffuse_map = has_map(TextureSlot::Diffuse);
        uniforms.has_diffuse_alpha_map = has_map(TextureSlot::AlphaMask);
        uniforms.has_normal_map = has_map(TextureSlot::Normal);
        uniforms.has_displacement_map = has_map(TextureSlot::Displacement);
        uniforms.render_shadow_map = flag(self.toggles.shadow_map);
        uniforms.has_cube_map = flag(self.toggles.environment_map);

        true
    }

    // ===== RENDER TOGGLES =====

    pub fn toggles(&self) -> &RenderToggles {
        &self.toggles
    }

    /// Enable or disable the map in `slot`
    pub fn set_render_map(&mut self, slot: TextureSlot, enabled: bool) {
        let changed = replace_toggle(self.toggles.map_mut(slot), enabled);
        self.on_toggle_changed(changed);
    }

    pub fn set_render_shadow_map(&mut self, enabled: bool) {
        let changed = replace_toggle(&mut self.toggles.shadow_map, enabled);
        self.on_toggle_changed(changed);
    }

    pub fn set_render_environment_map(&mut self, enabled: bool) {
        let changed = replace_toggle(&mut self.toggles.environment_map, enabled);
        self.on_toggle_changed(changed);
    }

    fn on_toggle_changed(&mut self, changed: bool) {
        if changed {
            self.signal.invalidate();
        }
    }

    // ===== STATE =====

    /// Whether the next `update_material_variables` will copy
    pub fn is_dirty(&self) -> bool {
        self.signal.is_dirty()
    }

    /// Whether any texture slot holds a view
    pub fn has_textures(&self) -> bool {
        self.store.has_any_texture()
    }

    pub fn store(&self) -> &ResourceSlotStore {
        &self.store
    }

    pub fn resolver(&self) -> &BindSlotResolver {
        &self.resolver
    }

    pub fn config(&self) -> &MaterialVariablesConfig {
        &self.config
    }

    // ===== INVALIDATION =====

    /// Register a callback raised whenever the drawable must be redrawn
    ///
    /// Raised on material reassignment, render toggle changes and every
    /// material field change. Field changes raise it from inside the material
    /// setter, on the setter's thread.
    pub fn on_invalidate_renderer(&mut self, handler: impl FnMut() + Send + 'static) {
        self.signal
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(handler));
    }
}

fn replace_toggle(toggle: &mut bool, value: bool) -> bool {
    if *toggle == value {
        return false;
    }
    *toggle = value;
    true
}

#[cfg(test)]
#[path = "phong_material_variables_tests.rs"]
mod tests;
