//! Integration tests for PhongMaterialVariables through the public API
//!
//! A recording device context stands in for the GPU.
//! No GPU required.
//!
//! Run with: cargo test --test material_binding_integration_tests


use std::sync::{Arc, Mutex};
use galaxy_3d_material::galaxy3d::Engine;
use galaxy_3d_material::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_material::galaxy3d::material::{
    MaterialVariablesConfig, PhongMaterial, PhongMaterialState, PhongMaterialUniforms,
    PhongMaterialVariables, SamplerStatePool, TextureSlot, TextureSource,
};
use galaxy_3d_material::galaxy3d::render::{
    ReflectedShader, SamplerDesc, Shader, ShaderPass, ShaderStage,
};
use galaxy_3d_material::glam::Vec4;
use material_test_utils::{create_test_device, solid_png, Bind, RecordingContext};
use serial_test::serial;

// ============================================================================
// HELPERS
// ============================================================================

struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn forward_pass() -> ShaderPass {
    ShaderPass::new(
        "forward",
        vec![
            Arc::new(
                ReflectedShader::new(ShaderStage::Domain)
                    .with_texture("texDisplacementMap", 0)
                    .with_sampler("samplerDisplace", 0),
            ) as Arc<dyn Shader>,
            Arc::new(
                ReflectedShader::new(ShaderStage::Pixel)
                    .with_texture("texDiffuseMap", 0)
                    .with_texture("texAlphaMap", 1)
                    .with_texture("texNormalMap", 2)
                    .with_sampler("samplerDiffuse", 0)
                    .with_sampler("samplerAlpha", 1)
                    .with_sampler("samplerNormal", 2)
                    .with_sampler("samplerShadow", 3),
            ) as Arc<dyn Shader>,
        ],
    )
}

// ============================================================================
// INTEGRATION TESTS
// ============================================================================

#[test]
fn test_integration_draw_loop() {
    let (device, shared) = create_test_device();
    let pool = SamplerStatePool::new(shared.clone());
    let mut vars = PhongMaterialVariables::new(shared, Arc::new(pool.clone()), MaterialVariablesConfig::default());
    let pass = forward_pass();

    let material = PhongMaterial::new(PhongMaterialState {
        diffuse_map: Some(TextureSource::encoded(solid_png(4, 4, [200, 100, 50, 255]))),
        displacement_map: Some(TextureSource::rgba8(2, 2, vec![128u8; 16])),
        ..PhongMaterialState::default()
    });
    vars.set_material(Some(material.clone()));
    vars.set_render_shadow_map(true);

    let mut uniforms = PhongMaterialUniforms::default();
    for frame in 0..3 {
        let mut ctx = RecordingContext::default();
        assert!(vars.bind_material_textures(&mut ctx, &pass));
        assert_eq!(
            ctx.binds,
            vec![
                Bind::Texture(ShaderStage::Domain, 0),
                Bind::Sampler(ShaderStage::Domain, 0),
                Bind::Texture(ShaderStage::Pixel, 0),
                Bind::Sampler(ShaderStage::Pixel, 0),
                Bind::Sampler(ShaderStage::Pixel, 3),
            ]
        );
        // Uniforms are written on the first frame only
        assert_eq!(vars.update_material_variables(&mut uniforms), frame == 0);
    }

    assert_eq!(uniforms.has_diffuse_map, 1);
    assert_eq!(uniforms.has_displacement_map, 1);
    assert_eq!(uniforms.render_shadow_map, 1);
    assert_eq!(vars.resolver().rebuild_count(), 1);
    assert_eq!(device.lock().unwrap().textures_created, 2);
    assert_eq!(device.lock().unwrap().samplers_created, 2);

    // Editor changes the diffuse color between frames
    material.set_diffuse_color(Vec4::new(0.0, 1.0, 0.0, 1.0));
    assert!(vars.update_material_variables(&mut uniforms));
    assert_eq!(uniforms.diffuse, [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn test_integration_two_drawables_share_samplers() {
    let (device, shared) = create_test_device();
    let pool = SamplerStatePool::new(shared.clone());
    let config = MaterialVariablesConfig::default();
    let mut a = PhongMaterialVariables::new(shared.clone(), Arc::new(pool.clone()), config.clone());
    let mut b = PhongMaterialVariables::new(shared, Arc::new(pool.clone()), config);
    let material = PhongMaterial::default();

    a.set_material(Some(material.clone()));
    b.set_material(Some(material.clone()));
    assert_eq!(device.lock().unwrap().samplers_created, 2);
    assert_eq!(pool.ref_count(&SamplerDesc::default()), 8);

    // Releasing one drawable keeps the other's samplers alive
    drop(a);
    assert_eq!(pool.ref_count(&SamplerDesc::default()), 4);
    assert_eq!(pool.ref_count(&SamplerDesc::SHADOW), 1);

    let mut ctx = RecordingContext::default();
    b.set_render_shadow_map(true);
    assert!(b.bind_material_textures(&mut ctx, &forward_pass()));
    assert_eq!(ctx.binds, vec![Bind::Sampler(ShaderStage::Pixel, 3)]);

    b.set_material(None);
    assert_eq!(pool.live_count(), 0);
    assert_eq!(material.subscriber_count(), 0);
}

#[test]
fn test_integration_normal_map_swap_keeps_resolved_pass() {
    let (_device, shared) = create_test_device();
    let pool = SamplerStatePool::new(shared.clone());
    let mut vars = PhongMaterialVariables::new(shared, Arc::new(pool), MaterialVariablesConfig::default());
    let pass = forward_pass();
    let material = PhongMaterial::default();
    vars.set_material(Some(material.clone()));

    let mut ctx = RecordingContext::default();
    vars.bind_material_textures(&mut ctx, &pass);
    assert!(ctx.binds.is_empty());

    material.set_normal_map(Some(TextureSource::rgba8(1, 1, vec![128, 128, 255, 255])));
    vars.bind_material_textures(&mut ctx, &pass);

    assert_eq!(
        ctx.binds,
        vec![Bind::Texture(ShaderStage::Pixel, 2), Bind::Sampler(ShaderStage::Pixel, 2)]
    );
    assert_eq!(vars.resolver().rebuild_count(), 1);
    assert!(vars.store().has_texture(TextureSlot::Normal));
}

#[test]
#[serial]
fn test_integration_malformed_image_logs_warning() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CapturingLogger { entries: entries.clone() });

    let (device, shared) = create_test_device();
    let pool = SamplerStatePool::new(shared.clone());
    let mut vars = PhongMaterialVariables::new(shared, Arc::new(pool), MaterialVariablesConfig::default());
    let material = PhongMaterial::default();
    material.set_diffuse_map(Some(TextureSource::encoded(b"not an image".to_vec())));
    vars.set_material(Some(material));

    let mut uniforms = PhongMaterialUniforms::default();
    let mut ctx = RecordingContext::default();
    assert!(vars.bind_material_textures(&mut ctx, &forward_pass()));
    assert!(vars.update_material_variables(&mut uniforms));

    Engine::reset_logger();

    assert!(ctx.binds.is_empty());
    assert_eq!(uniforms.has_diffuse_map, 0);
    assert_eq!(device.lock().unwrap().textures_created, 0);

    let captured = entries.lock().unwrap();
    let warnings: Vec<_> = captured
        .iter()
        .filter(|e| e.severity == LogSeverity::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].source, "galaxy3d::TextureView");
}
