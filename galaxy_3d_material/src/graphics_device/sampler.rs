/// Sampler trait and sampler state descriptor
///
/// `SamplerDesc` is the pooling key: two equal descriptors must resolve to the
/// same GPU sampler object. Float fields are compared and hashed bitwise.

use std::hash::{Hash, Hasher};

/// Texel filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Nearest texel
    Nearest,
    /// Linear interpolation
    Linear,
}

/// Texture coordinate addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// Tile the texture
    Wrap,
    /// Tile the texture, flipping every other repetition
    Mirror,
    /// Clamp to the edge texel
    Clamp,
    /// Use the border color outside [0, 1]
    Border,
}

/// Comparison function for comparison samplers (shadow maps)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Sampler state descriptor
#[derive(Debug, Clone, Copy)]
pub struct SamplerDesc {
    /// Minification filter
    pub min_filter: FilterMode,
    /// Magnification filter
    pub mag_filter: FilterMode,
    /// Filter between mip levels
    pub mip_filter: FilterMode,
    /// Addressing along U
    pub address_u: AddressMode,
    /// Addressing along V
    pub address_v: AddressMode,
    /// Addressing along W
    pub address_w: AddressMode,
    /// Maximum anisotropy (1 = anisotropic filtering disabled)
    pub max_anisotropy: u32,
    /// Comparison function (Some = comparison sampler)
    pub compare: Option<CompareOp>,
    /// Border color used with `AddressMode::Border` (RGBA)
    pub border_color: [f32; 4],
    /// Bias added to the computed mip level
    pub mip_lod_bias: f32,
    /// Lowest mip level that may be sampled
    pub min_lod: f32,
    /// Highest mip level that may be sampled
    pub max_lod: f32,
}

impl SamplerDesc {
    /// Trilinear, wrapping, 4x anisotropic. Default for all material maps.
    pub const LINEAR_WRAP_ANISO4: Self = Self {
        min_filter: FilterMode::Linear,
        mag_filter: FilterMode::Linear,
        mip_filter: FilterMode::Linear,
        address_u: AddressMode::Wrap,
        address_v: AddressMode::Wrap,
        address_w: AddressMode::Wrap,
        max_anisotropy: 4,
        compare: None,
        border_color: [0.0, 0.0, 0.0, 0.0],
        mip_lod_bias: 0.0,
        min_lod: 0.0,
        max_lod: f32::MAX,
    };

    /// Point sampling, clamped
    pub const NEAREST_CLAMP: Self = Self {
        min_filter: FilterMode::Nearest,
        mag_filter: FilterMode::Nearest,
        mip_filter: FilterMode::Nearest,
        address_u: AddressMode::Clamp,
        address_v: AddressMode::Clamp,
        address_w: AddressMode::Clamp,
        max_anisotropy: 1,
        compare: None,
        border_color: [0.0, 0.0, 0.0, 0.0],
        mip_lod_bias: 0.0,
        min_lod: 0.0,
        max_lod: f32::MAX,
    };

    /// Comparison sampler for shadow maps (white border = lit outside the map)
    pub const SHADOW: Self = Self {
        min_filter: FilterMode::Linear,
        mag_filter: FilterMode::Linear,
        mip_filter: FilterMode::Nearest,
        address_u: AddressMode::Border,
        address_v: AddressMode::Border,
        address_w: AddressMode::Border,
        max_anisotropy: 1,
        compare: Some(CompareOp::LessOrEqual),
        border_color: [1.0, 1.0, 1.0, 1.0],
        mip_lod_bias: 0.0,
        min_lod: 0.0,
        max_lod: f32::MAX,
    };

    /// Whether this is a comparison sampler
    pub fn is_comparison(&self) -> bool {
        self.compare.is_some()
    }

    fn float_bits(&self) -> [u32; 7] {
        [
            self.border_color[0].to_bits(),
            self.border_color[1].to_bits(),
            self.border_color[2].to_bits(),
            self.border_color[3].to_bits(),
            self.mip_lod_bias.to_bits(),
            self.min_lod.to_bits(),
            self.max_lod.to_bits(),
        ]
    }
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self::LINEAR_WRAP_ANISO4
    }
}

impl PartialEq for SamplerDesc {
    fn eq(&self, other: &Self) -> bool {
        self.min_filter == other.min_filter
            && self.mag_filter == other.mag_filter
            && self.mip_filter == other.mip_filter
            && self.address_u == other.address_u
            && self.address_v == other.address_v
            && self.address_w == other.address_w
            && self.max_anisotropy == other.max_anisotropy
            && self.compare == other.compare
            && self.float_bits() == other.float_bits()
    }
}

impl Eq for SamplerDesc {}

impl Hash for SamplerDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min_filter.hash(state);
        self.mag_filter.hash(state);
        self.mip_filter.hash(state);
        self.address_u.hash(state);
        self.address_v.hash(state);
        self.address_w.hash(state);
        self.max_anisotropy.hash(state);
        self.compare.hash(state);
        self.float_bits().hash(state);
    }
}

/// GPU sampler state object
///
/// Implemented by backend-specific sampler types. Destroyed when dropped.
pub trait Sampler: Send + Sync {
    /// Descriptor this sampler was created from
    fn desc(&self) -> &SamplerDesc;
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
