/// Phong material: the observable surface description consumed by the binder.
///
/// `PhongMaterial` is a cheap, cloneable handle to shared state. Every setter
/// publishes one typed `MaterialChange` to each subscriber, so a binder can
/// re-derive exactly the one GPU resource a field maps to.
///
/// Notifications are queued per subscriber and drained by the subscriber on
/// its own thread (see `MaterialSubscription::drain`). A subscriber may also
/// register a callback that runs synchronously inside the setter.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, PoisonError, Weak};
use std::sync::mpsc::{self, Receiver, Sender};
use glam::Vec4;
use slotmap::{new_key_type, SlotMap};
use crate::graphics_device::SamplerDesc;
use crate::material::slots::TextureSlot;

// ===== TEXTURE SOURCE =====

/// Image data for one texture slot
#[derive(Clone)]
pub enum TextureSource {
    /// Encoded image file contents (PNG)
    Encoded(Arc<[u8]>),
    /// Raw RGBA8 pixels, tightly packed rows
    Rgba8 {
        width: u32,
        height: u32,
        pixels: Arc<[u8]>,
    },
}

impl TextureSource {
    /// Encoded image file contents
    pub fn encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        TextureSource::Encoded(bytes.into())
    }

    /// Raw RGBA8 pixels
    pub fn rgba8(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        TextureSource::Rgba8 {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Size of the source data in bytes
    pub fn byte_len(&self) -> usize {
        match self {
            TextureSource::Encoded(bytes) => bytes.len(),
            TextureSource::Rgba8 { pixels, .. } => pixels.len(),
        }
    }
}

impl fmt::Debug for TextureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSource::Encoded(bytes) => write!(f, "Encoded({} bytes)", bytes.len()),
            TextureSource::Rgba8 { width, height, pixels } => {
                write!(f, "Rgba8({}x{}, {} bytes)", width, height, pixels.len())
            }
        }
    }
}

// ===== MATERIAL STATE =====

/// Field values of a Phong material
#[derive(Debug, Clone)]
pub struct PhongMaterialState {
    pub ambient_color: Vec4,
    pub diffuse_color: Vec4,
    pub emissive_color: Vec4,
    pub reflective_color: Vec4,
    pub specular_color: Vec4,
    pub specular_shininess: f32,
    /// xyz: per-channel displacement mask, w: displacement scale
    pub displacement_map_scale_mask: Vec4,
    pub diffuse_map: Option<TextureSource>,
    pub diffuse_alpha_map: Option<TextureSource>,
    pub normal_map: Option<TextureSource>,
    pub displacement_map: Option<TextureSource>,
    pub diffuse_map_sampler: SamplerDesc,
    pub diffuse_alpha_map_sampler: SamplerDesc,
    pub normal_map_sampler: SamplerDesc,
    pub displacement_map_sampler: SamplerDesc,
}

impl Default for PhongMaterialState {
    fn default() -> Self {
        Self {
            ambient_color: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse_color: Vec4::ONE,
            emissive_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            reflective_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            specular_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            specular_shininess: 30.0,
            displacement_map_scale_mask: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse_map: None,
            diffuse_alpha_map: None,
            normal_map: None,
            displacement_map: None,
            diffuse_map_sampler: SamplerDesc::default(),
            diffuse_alpha_map_sampler: SamplerDesc::default(),
            normal_map_sampler: SamplerDesc::default(),
            displacement_map_sampler: SamplerDesc::default(),
        }
    }
}

impl PhongMaterialState {
    /// Image source of a texture slot
    pub fn texture_source(&self, slot: TextureSlot) -> Option<&TextureSource> {
        match slot {
            TextureSlot::Diffuse => self.diffuse_map.as_ref(),
            TextureSlot::AlphaMask => self.diffuse_alpha_map.as_ref(),
            TextureSlot::Normal => self.normal_map.as_ref(),
            TextureSlot::Displacement => self.displacement_map.as_ref(),
        }
    }

    /// Sampler descriptor of a texture slot's map
    pub fn map_sampler(&self, slot: TextureSlot) -> &SamplerDesc {
        match slot {
            TextureSlot::Diffuse => &self.diffuse_map_sampler,
            TextureSlot::AlphaMask => &self.diffuse_alpha_map_sampler,
            TextureSlot::Normal => &self.normal_map_sampler,
            TextureSlot::Displacement => &self.displacement_map_sampler,
        }
    }

    fn texture_source_mut(&mut self, slot: TextureSlot) -> &mut Option<TextureSource> {
        match slot {
            TextureSlot::Diffuse => &mut self.diffuse_map,
            TextureSlot::AlphaMask => &mut self.diffuse_alpha_map,
            TextureSlot::Normal => &mut self.normal_map,
            TextureSlot::Displacement => &mut self.displacement_map,
        }
    }

    fn map_sampler_mut(&mut self, slot: TextureSlot) -> &mut SamplerDesc {
        match slot {
            TextureSlot::Diffuse => &mut self.diffuse_map_sampler,
            TextureSlot::AlphaMask => &mut self.diffuse_alpha_map_sampler,
            TextureSlot::Normal => &mut self.normal_map_sampler,
            TextureSlot::Displacement => &mut self.displacement_map_sampler,
        }
    }
}

// ===== CHANGE EVENTS =====

/// A single tracked material field changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialChange {
    AmbientColor,
    DiffuseColor,
    EmissiveColor,
    ReflectiveColor,
    SpecularColor,
    SpecularShininess,
    DisplacementMapScaleMask,
    DiffuseMap,
    DiffuseAlphaMap,
    NormalMap,
    DisplacementMap,
    DiffuseMapSampler,
    DiffuseAlphaMapSampler,
    NormalMapSampler,
    DisplacementMapSampler,
}

impl MaterialChange {
    /// Change event for a texture slot's image source
    pub fn for_map_source(slot: TextureSlot) -> Self {
        match slot {
            TextureSlot::Diffuse => MaterialChange::DiffuseMap,
            TextureSlot::AlphaMask => MaterialChange::DiffuseAlphaMap,
            TextureSlot::Normal => MaterialChange::NormalMap,
            TextureSlot::Displacement => MaterialChange::DisplacementMap,
        }
    }

    /// Change event for a texture slot's sampler
    pub fn for_map_sampler(slot: TextureSlot) -> Self {
        match slot {
            TextureSlot::Diffuse => MaterialChange::DiffuseMapSampler,
            TextureSlot::AlphaMask => MaterialChange::DiffuseAlphaMapSampler,
            TextureSlot::Normal => MaterialChange::NormalMapSampler,
            TextureSlot::Displacement => MaterialChange::DisplacementMapSampler,
        }
    }

    /// Texture slot whose image source changed
    pub fn map_source(&self) -> Option<TextureSlot> {
        match self {
            MaterialChange::DiffuseMap => Some(TextureSlot::Diffuse),
            MaterialChange::DiffuseAlphaMap => Some(TextureSlot::AlphaMask),
            MaterialChange::NormalMap => Some(TextureSlot::Normal),
            MaterialChange::DisplacementMap => Some(TextureSlot::Displacement),
            _ => None,
        }
    }

    /// Texture slot whose sampler descriptor changed
    pub fn map_sampler(&self) -> Option<TextureSlot> {
        match self {
            MaterialChange::DiffuseMapSampler => Some(TextureSlot::Diffuse),
            MaterialChange::DiffuseAlphaMapSampler => Some(TextureSlot::AlphaMask),
            MaterialChange::NormalMapSampler => Some(TextureSlot::Normal),
            MaterialChange::DisplacementMapSampler => Some(TextureSlot::Displacement),
            _ => None,
        }
    }
}

// ===== SHARED MATERIAL =====

new_key_type! {
    /// Key of a material subscriber
    pub struct SubscriberKey;
}

/// Called from the setter, after the state lock is released
pub type ChangeCallback = Arc<dyn Fn(MaterialChange) + Send + Sync>;

struct Subscriber {
    sender: Sender<MaterialChange>,
    on_change: Option<ChangeCallback>,
}

struct MaterialShared {
    state: RwLock<PhongMaterialState>,
    subscribers: Mutex<SlotMap<SubscriberKey, Subscriber>>,
}

/// Shared, observable Phong material
///
/// Clones refer to the same material.
#[derive(Clone)]
pub struct PhongMaterial {
    shared: Arc<MaterialShared>,
}

impl PhongMaterial {
    /// Create a material from initial field values
    pub fn new(state: PhongMaterialState) -> Self {
        Self {
            shared: Arc::new(MaterialShared {
                state: RwLock::new(state),
                subscribers: Mutex::new(SlotMap::with_key()),
            }),
        }
    }

    /// Whether both handles refer to the same material
    pub fn ptr_eq(&self, other: &PhongMaterial) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Read access to the current field values
    pub fn state(&self) -> RwLockReadGuard<'_, PhongMaterialState> {
        self.shared.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current field values
    pub fn snapshot(&self) -> PhongMaterialState {
        self.state().clone()
    }

    /// Subscribe to field change events
    ///
    /// Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> MaterialSubscription {
        self.add_subscriber(None)
    }

    /// Subscribe, and also run `on_change` synchronously on every change
    ///
    /// The event is queued before `on_change` runs.
    pub fn subscribe_with(&self, on_change: impl Fn(MaterialChange) + Send + Sync + 'static) -> MaterialSubscription {
        self.add_subscriber(Some(Arc::new(on_change)))
    }

    fn add_subscriber(&self, on_change: Option<ChangeCallback>) -> MaterialSubscription {
        let (sender, receiver) = mpsc::channel();
        let key = self
            .shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Subscriber { sender, on_change });
        MaterialSubscription {
            key,
            receiver,
            material: Arc::downgrade(&self.shared),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // ===== SETTERS =====

    pub fn set_ambient_color(&self, color: Vec4) {
        self.update(MaterialChange::AmbientColor, |s| replace_if_changed(&mut s.ambient_color, color));
    }

    pub fn set_diffuse_color(&self, color: Vec4) {
        self.update(MaterialChange::DiffuseColor, |s| replace_if_changed(&mut s.diffuse_color, color));
    }

    pub fn set_emissive_color(&self, color: Vec4) {
        self.update(MaterialChange::EmissiveColor, |s| replace_if_changed(&mut s.emissive_color, color));
    }

    pub fn set_reflective_color(&self, color: Vec4) {
        self.update(MaterialChange::ReflectiveColor, |s| replace_if_changed(&mut s.reflective_color, color));
    }

    pub fn set_specular_color(&self, color: Vec4) {
        self.update(MaterialChange::SpecularColor, |s| replace_if_changed(&mut s.specular_color, color));
    }

    pub fn set_specular_shininess(&self, shininess: f32) {
        self.update(MaterialChange::SpecularShininess, |s| {
            replace_if_changed(&mut s.specular_shininess, shininess)
        });
    }

    pub fn set_displacement_map_scale_mask(&self, scale_mask: Vec4) {
        self.update(MaterialChange::DisplacementMapScaleMask, |s| {
            replace_if_changed(&mut s.displacement_map_scale_mask, scale_mask)
        });
    }

    /// Replace the image source of a texture slot
    ///
    /// Always publishes: image sources are not compared.
    pub fn set_map(&self, slot: TextureSlot, source: Option<TextureSource>) {
        self.update(MaterialChange::for_map_source(slot), |s| {
            *s.texture_source_mut(slot) = source;
            true
        });
    }

    /// Replace the sampler descriptor of a texture slot's map
    pub fn set_map_sampler(&self, slot: TextureSlot, desc: SamplerDesc) {
        self.update(MaterialChange::for_map_sampler(slot), |s| {
            replace_if_changed(s.map_sampler_mut(slot), desc)
        });
    }

    pub fn set_diffuse_map(&self, source: Option<TextureSource>) {
        self.set_map(TextureSlot::Diffuse, source);
    }

    pub fn set_diffuse_alpha_map(&self, source: Option<TextureSource>) {
        self.set_map(TextureSlot::AlphaMask, source);
    }

    pub fn set_normal_map(&self, source: Option<TextureSource>) {
        self.set_map(TextureSlot::Normal, source);
    }

    pub fn set_displacement_map(&self, source: Option<TextureSource>) {
        self.set_map(TextureSlot::Displacement, source);
    }

    fn update(&self, change: MaterialChange, apply: impl FnOnce(&mut PhongMaterialState) -> bool) {
        let changed = {
            let mut state = self.shared.state.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut state)
        };
        if changed {
            self.notify(change);
        }
    }

    fn notify(&self, change: MaterialChange) {
        let callbacks: Vec<ChangeCallback> = {
            let mut subscribers = self
                .shared
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscribers.retain(|_, subscriber| subscriber.sender.send(change).is_ok());
            subscribers.values().filter_map(|subscriber| subscriber.on_change.clone()).collect()
        };
        // Subscriber lock released: callbacks may touch the material
        for on_change in callbacks {
            on_change(change);
        }
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self::new(PhongMaterialState::default())
    }
}

impl fmt::Debug for PhongMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhongMaterial")
            .field("state", &*self.state())
            .finish()
    }
}

fn replace_if_changed<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

// ===== SUBSCRIPTION =====

/// Queue of change events from one material
pub struct MaterialSubscription {
    key: SubscriberKey,
    receiver: Receiver<MaterialChange>,
    material: Weak<MaterialShared>,
}

impl MaterialSubscription {
    /// Take every pending change event, oldest first
    pub fn drain(&self) -> impl Iterator<Item = MaterialChange> + '_ {
        self.receiver.try_iter()
    }
}

impl Drop for MaterialSubscription {
    fn drop(&mut self) {
        if let Some(material) = self.material.upgrade() {
            let mut subscribers = material
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscribers.remove(self.key);
        }
    }
}

#[cfg(test)]
#[path = "phong_material_tests.rs"]
mod tests;
