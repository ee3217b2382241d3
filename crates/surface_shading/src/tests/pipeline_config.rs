//! Pipeline behavior under non-default configurations

use crate::prelude::*;
use crate::shading::{gamma_correct, tone_map_reinhard};
use approx::assert_relative_eq;

fn upward_fragment() -> FragmentInput {
    FragmentInput {
        position: Vec3::new(0.0, -1.0, -4.0),
        normal: Vec3::new(0.0, 1.0, 0.0),
        tangent: Vec3::new(1.0, 0.0, 0.0),
        binormal: Vec3::new(0.0, 0.0, -1.0),
        uv: Vec2::new(0.5, 0.5),
    }
}

fn sun() -> DirectionalLight {
    DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), Vec4::new(1.0, 1.0, 1.0, 1.0), 1.0)
}

#[test]
fn test_cook_torrance_rejects_directional_lights() {
    let config = ShadingConfig::default().with_lights(EnabledLights {
        directional: true,
        ..EnabledLights::POINT_ONLY
    });

    match ShadingPipeline::new(&config) {
        Err(ShadingError::UnsupportedLight { model, kind }) => {
            assert_eq!(model, ShadingModel::CookTorrance);
            assert_eq!(kind, LightKind::Directional);
        }
        other => panic!("expected UnsupportedLight, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ShadingConfig::default().with_gamma(-1.0);
    assert!(matches!(
        ShadingPipeline::new(&config),
        Err(ShadingError::Config(_))
    ));
}

#[test]
fn test_blinn_phong_shades_every_light_kind() {
    let config = ShadingConfig::default()
        .with_model(ShadingModel::BlinnPhong)
        .with_lights(EnabledLights::ALL);
    let pipeline = ShadingPipeline::new(&config).unwrap();
    assert_eq!(pipeline.model(), ShadingModel::BlinnPhong);
    for kind in LightKind::ALL {
        assert!(pipeline.is_enabled(kind));
    }

    let frame = PerFrameData::indoor_warm().unwrap();
    let material = MaterialData::default().with_base_color(Vec4::new(0.7, 0.7, 0.7, 1.0));
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    let color = pipeline.shade(&frame, &draw, &upward_fragment());
    for channel in color.xyz().iter() {
        assert!(channel.is_finite());
        assert!((0.0..1.0).contains(channel), "channel {channel}");
    }
}

#[test]
fn test_disabled_light_kinds_do_not_contribute() {
    let frame = PerFrameData::new(Vec4::zeros())
        .with_directional_light(sun())
        .unwrap();
    let material = MaterialData::default();
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    let point_only = ShadingPipeline::new(&ShadingConfig::default().with_model(ShadingModel::BlinnPhong)).unwrap();
    assert!(!point_only.is_enabled(LightKind::Directional));
    let surface = point_only.surface_point(&draw, &upward_fragment());
    assert_eq!(point_only.direct_lighting(&frame, &surface), Vec3::zeros());

    let with_sun = ShadingPipeline::new(
        &ShadingConfig::default()
            .with_model(ShadingModel::BlinnPhong)
            .with_lights(EnabledLights::ALL),
    )
    .unwrap();
    assert!(with_sun.direct_lighting(&frame, &surface).x > 0.0);
}

#[test]
fn test_coincident_light_needs_distance_floor() {
    let fragment = upward_fragment();
    let frame = PerFrameData::new(Vec4::zeros())
        .with_point_light(PointLight::new(
            fragment.position,
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            5.0,
            1.0,
        ))
        .unwrap();
    let material = MaterialData::default();
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    let unguarded = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let color = unguarded.shade(&frame, &draw, &fragment);
    assert!(!color.x.is_finite());

    let guarded = ShadingPipeline::new(&ShadingConfig::default().with_min_light_distance(1.0e-3)).unwrap();
    let color = guarded.shade(&frame, &draw, &fragment);
    assert!(color.xyz().iter().all(|c| c.is_finite()));
}

#[test]
fn test_gamma_applies_after_tone_mapping() {
    let ambient = Vec4::new(0.5, 0.5, 0.5, 1.0);
    let frame = PerFrameData::new(ambient);
    let material = MaterialData::default();
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    let pipeline = ShadingPipeline::new(&ShadingConfig::default().with_gamma(2.2)).unwrap();
    let color = pipeline.shade(&frame, &draw, &upward_fragment());

    let expected = gamma_correct(&tone_map_reinhard(&ambient.xyz()), 2.2);
    assert_relative_eq!(color.xyz(), expected, epsilon = 1e-6);
}

#[test]
fn test_untonemapped_output_can_exceed_one() {
    let frame = PerFrameData::new(Vec4::new(3.0, 3.0, 3.0, 1.0));
    let material = MaterialData::default();
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    let pipeline =
        ShadingPipeline::new(&ShadingConfig::default().with_tone_mapping(ToneMapping::None)).unwrap();
    let color = pipeline.shade(&frame, &draw, &upward_fragment());
    assert_relative_eq!(color.xyz(), Vec3::repeat(3.0), epsilon = 1e-6);
}

/// Bank holding a half-dark occlusion texture at handle 0
fn occlusion_inputs() -> (MaterialData, MaterialTextures, TextureBank) {
    let mut bank = TextureBank::new();
    let occlusion = bank.add_texture(Texture::solid(Vec4::new(0.5, 0.5, 0.5, 1.0)));
    let textures = MaterialTextures::default().with(TextureSlot::Occlusion, occlusion);
    let mut material = MaterialData::default().with_textures(TextureFlags::OCCLUSION);
    material.occlusion_texture_strength = 0.5;
    (material, textures, bank)
}

#[test]
fn test_occlusion_is_ignored_by_default() {
    let (material, textures, bank) = occlusion_inputs();
    let draw = DrawInputs::new(&material, &textures, &bank);
    let frame = PerFrameData::new(Vec4::new(1.0, 1.0, 1.0, 1.0));

    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let color = pipeline.shade(&frame, &draw, &upward_fragment());
    assert_relative_eq!(color.x, 0.5, epsilon = 1e-6);
}

#[test]
fn test_occlusion_darkens_ambient_when_enabled() {
    let (material, textures, bank) = occlusion_inputs();
    let draw = DrawInputs::new(&material, &textures, &bank);
    let frame = PerFrameData::new(Vec4::new(1.0, 1.0, 1.0, 1.0));

    let config = ShadingConfig::default().with_compat(CompatFlags {
        apply_occlusion: true,
        ..CompatFlags::default()
    });
    let pipeline = ShadingPipeline::new(&config).unwrap();
    let color = pipeline.shade(&frame, &draw, &upward_fragment());

    // 1 + 0.5 * (0.5 - 1) = 0.75 of the ambient reaches the surface
    assert_relative_eq!(color.x, 0.75 / 1.75, epsilon = 1e-6);
}

#[test]
fn test_normal_scale_only_with_compat_flag() {
    let mut bank = TextureBank::new();
    // tangent-space (0.5, 0, 0.5) before scaling
    let normal_map = bank.add_texture(Texture::solid(Vec4::new(0.75, 0.5, 0.75, 1.0)));
    let textures = MaterialTextures::default().with(TextureSlot::Normal, normal_map);
    let mut material = MaterialData::default().with_textures(TextureFlags::NORMAL);
    material.normal_texture_scale = 0.0;
    let draw = DrawInputs::new(&material, &textures, &bank);
    let fragment = upward_fragment();

    let raw = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let tilted = raw.surface_point(&draw, &fragment).normal;
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(tilted, Vec3::new(half, half, 0.0), epsilon = 1e-6);

    let config = ShadingConfig::default().with_compat(CompatFlags {
        apply_normal_texture_scale: true,
        ..CompatFlags::default()
    });
    let scaled = ShadingPipeline::new(&config).unwrap();
    let flattened = scaled.surface_point(&draw, &fragment).normal;
    assert_relative_eq!(flattened, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}
