/// GPU-visible Phong material parameter record
///
/// Matches the shader's constant buffer layout (std140-compatible, 128 bytes).
/// Boolean flags are stored as `i32` 0/1.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PhongMaterialUniforms {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub emissive: [f32; 4],
    pub reflect: [f32; 4],
    pub specular: [f32; 4],
    /// xyz: displacement mask, w: displacement scale
    pub displacement_map_scale_mask: [f32; 4],
    pub shininess: f32,
    pub has_diffuse_map: i32,
    pub has_diffuse_alpha_map: i32,
    pub has_normal_map: i32,
    pub has_displacement_map: i32,
    pub render_shadow_map: i32,
    pub has_cube_map: i32,
    pub _padding: f32,
}

impl PhongMaterialUniforms {
    /// Size of the record in bytes
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Raw bytes for upload into a uniform buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for PhongMaterialUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Integer encoding of a shader flag
pub(crate) fn flag(value: bool) -> i32 {
    i32::from(value)
}
