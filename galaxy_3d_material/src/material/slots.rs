/// Semantic texture and sampler slots
///
/// Slots are closed enums; per-slot storage is a fixed array sized by the
/// enum's cardinality and indexed by the enum itself.

use std::ops::{Index, IndexMut};

/// Number of texture slots
pub const NUM_TEXTURE_SLOTS: usize = 4;

/// Number of sampler slots (texture slots + shadow)
pub const NUM_SAMPLER_SLOTS: usize = 5;

/// Material texture slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    AlphaMask,
    Normal,
    Displacement,
}

impl TextureSlot {
    /// All texture slots, in binding order
    pub const ALL: [TextureSlot; NUM_TEXTURE_SLOTS] = [
        TextureSlot::Diffuse,
        TextureSlot::AlphaMask,
        TextureSlot::Normal,
        TextureSlot::Displacement,
    ];

    pub fn index(&self) -> usize {
        match self {
            TextureSlot::Diffuse => 0,
            TextureSlot::AlphaMask => 1,
            TextureSlot::Normal => 2,
            TextureSlot::Displacement => 3,
        }
    }

    /// Sampler paired with this texture
    pub fn sampler_slot(&self) -> SamplerSlot {
        match self {
            TextureSlot::Diffuse => SamplerSlot::Diffuse,
            TextureSlot::AlphaMask => SamplerSlot::AlphaMask,
            TextureSlot::Normal => SamplerSlot::Normal,
            TextureSlot::Displacement => SamplerSlot::Displacement,
        }
    }
}

/// Material sampler slot
///
/// `Shadow` has no paired texture: the shadow map comes from the shadow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerSlot {
    Diffuse,
    AlphaMask,
    Normal,
    Displacement,
    Shadow,
}

impl SamplerSlot {
    /// All sampler slots, in binding order
    pub const ALL: [SamplerSlot; NUM_SAMPLER_SLOTS] = [
        SamplerSlot::Diffuse,
        SamplerSlot::AlphaMask,
        SamplerSlot::Normal,
        SamplerSlot::Displacement,
        SamplerSlot::Shadow,
    ];

    pub fn index(&self) -> usize {
        match self {
            SamplerSlot::Diffuse => 0,
            SamplerSlot::AlphaMask => 1,
            SamplerSlot::Normal => 2,
            SamplerSlot::Displacement => 3,
            SamplerSlot::Shadow => 4,
        }
    }

    /// Texture paired with this sampler (None for Shadow)
    pub fn texture_slot(&self) -> Option<TextureSlot> {
        match self {
            SamplerSlot::Diffuse => Some(TextureSlot::Diffuse),
            SamplerSlot::AlphaMask => Some(TextureSlot::AlphaMask),
            SamplerSlot::Normal => Some(TextureSlot::Normal),
            SamplerSlot::Displacement => Some(TextureSlot::Displacement),
            SamplerSlot::Shadow => None,
        }
    }
}

// ===== PER-SLOT ARRAYS =====

macro_rules! per_slot_array {
    ($(#[$meta:meta])* $name:ident, $slot:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<T>([T; $len]);

        impl<T> $name<T> {
            /// Build every entry from its slot
            pub fn from_fn(mut f: impl FnMut($slot) -> T) -> Self {
                Self(std::array::from_fn(|i| f($slot::ALL[i])))
            }

            /// Iterate (slot, value) pairs in slot order
            pub fn iter(&self) -> impl Iterator<Item = ($slot, &T)> {
                $slot::ALL.into_iter().zip(self.0.iter())
            }

            /// Iterate values in slot order
            pub fn values(&self) -> impl Iterator<Item = &T> {
                self.0.iter()
            }

            /// Iterate values mutably in slot order
            pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
                self.0.iter_mut()
            }
        }

        impl<T: Default> Default for $name<T> {
            fn default() -> Self {
                Self(std::array::from_fn(|_| T::default()))
            }
        }

        impl<T> Index<$slot> for $name<T> {
            type Output = T;

            fn index(&self, slot: $slot) -> &T {
                &self.0[slot.index()]
            }
        }

        impl<T> IndexMut<$slot> for $name<T> {
            fn index_mut(&mut self, slot: $slot) -> &mut T {
                &mut self.0[slot.index()]
            }
        }
    };
}

per_slot_array!(
    /// One value per texture slot
    PerTextureSlot, TextureSlot, NUM_TEXTURE_SLOTS
);

per_slot_array!(
    /// One value per sampler slot
    PerSamplerSlot, SamplerSlot, NUM_SAMPLER_SLOTS
);

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
