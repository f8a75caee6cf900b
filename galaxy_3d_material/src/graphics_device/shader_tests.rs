use super::*;
use crate::graphics_device::mock_graphics_device::{MockDeviceContext, MockTexture, MockSampler};
use crate::graphics_device::{TextureInfo, TextureFormat, SamplerDesc, ShaderPass};

fn test_texture() -> Arc<dyn Texture> {
    Arc::new(MockTexture {
        info: TextureInfo { width: 1, height: 1, format: TextureFormat::R8G8B8A8_UNORM },
        data_len: 4,
    })
}

// ============================================================================
// Stages
// ============================================================================

#[test]
fn test_stage_indices_are_dense() {
    for (i, stage) in ShaderStage::ALL.iter().enumerate() {
        assert_eq!(stage.index(), i);
    }
}

#[test]
fn test_texture_capable_excludes_compute() {
    assert!(ShaderStage::Vertex.can_bind_textures());
    assert!(ShaderStage::Domain.can_bind_textures());
    assert!(ShaderStage::Pixel.can_bind_textures());
    assert!(!ShaderStage::Compute.can_bind_textures());
}

// ============================================================================
// Bind slots
// ============================================================================

#[test]
fn test_bind_slot_sentinel() {
    assert!(!BindSlot::NONE.is_valid());
    assert_eq!(BindSlot::NONE.index(), None);
    assert_eq!(BindSlot::default(), BindSlot::NONE);
    assert_eq!(BindSlot::from(None), BindSlot::NONE);
}

#[test]
fn test_bind_slot_valid() {
    let slot = BindSlot::new(0);
    assert!(slot.is_valid());
    assert_eq!(slot.index(), Some(0));
    assert_eq!(BindSlot::from(Some(7)).index(), Some(7));
}

#[test]
fn test_reflected_max_index_maps_to_sentinel() {
    assert_eq!(BindSlot::from(Some(u32::MAX)), BindSlot::NONE);

    let shader = ReflectedShader::new(ShaderStage::Pixel).with_texture("texDiffuseMap", u32::MAX);
    assert_eq!(shader.texture_bind_slot("texDiffuseMap"), BindSlot::NONE);
}

// ============================================================================
// ReflectedShader
// ============================================================================

#[test]
fn test_reflected_shader_lookup() {
    let shader = ReflectedShader::new(ShaderStage::Pixel)
        .with_texture("texDiffuseMap", 0)
        .with_sampler("samplerDiffuse", 2);

    assert_eq!(shader.texture_bind_slot("texDiffuseMap"), BindSlot::new(0));
    assert_eq!(shader.sampler_bind_slot("samplerDiffuse"), BindSlot::new(2));
    assert_eq!(shader.texture_bind_slot("texNormalMap"), BindSlot::NONE);
    assert_eq!(shader.texture_count(), 1);
    assert_eq!(shader.sampler_count(), 1);
    assert!(!shader.is_null());
}

#[test]
fn test_null_shader() {
    let shader = ReflectedShader::null(ShaderStage::Geometry);
    assert!(shader.is_null());
    assert_eq!(shader.stage(), ShaderStage::Geometry);
}

#[test]
fn test_bind_at_sentinel_is_noop() {
    let shader = ReflectedShader::new(ShaderStage::Pixel);
    let mut ctx = MockDeviceContext::new();
    let sampler: Arc<dyn Sampler> = Arc::new(MockSampler { desc: SamplerDesc::default() });

    shader.bind_texture(&mut ctx, BindSlot::NONE, &test_texture());
    shader.bind_sampler(&mut ctx, BindSlot::NONE, &sampler);
    assert!(ctx.bindings.is_empty());

    shader.bind_texture(&mut ctx, BindSlot::new(3), &test_texture());
    shader.bind_sampler(&mut ctx, BindSlot::new(1), &sampler);
    assert_eq!(ctx.texture_binds(), vec![(ShaderStage::Pixel, 3)]);
    assert_eq!(ctx.sampler_binds(), vec![(ShaderStage::Pixel, 1)]);
}

// ============================================================================
// ShaderPass
// ============================================================================

#[test]
fn test_shader_pass_ids_are_unique() {
    let a = ShaderPass::new("a", vec![]);
    let b = ShaderPass::new("a", vec![]);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
}

#[test]
fn test_shader_pass_stage_lookup() {
    let pass = ShaderPass::new(
        "mesh",
        vec![
            Arc::new(ReflectedShader::new(ShaderStage::Vertex)),
            Arc::new(ReflectedShader::new(ShaderStage::Pixel)),
        ],
    );
    assert_eq!(pass.shaders().len(), 2);
    assert_eq!(pass.shader(ShaderStage::Pixel).map(|s| s.stage()), Some(ShaderStage::Pixel));
    assert!(pass.shader(ShaderStage::Hull).is_none());
    assert_eq!(pass.name(), "mesh");
}
