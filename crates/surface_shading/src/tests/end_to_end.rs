//! Full fragment shading through the default Cook-Torrance pipeline

use crate::foundation::math::constants::PI;
use crate::prelude::*;
use crate::shading::{evaluate_brdf, tone_map_reinhard};
use crate::uniforms::{MaterialUniform, PerFrameUniform};
use approx::assert_relative_eq;

const AMBIENT: f32 = 0.03;

/// Flat surface three units in front of the eye, facing it
fn facing_fragment() -> FragmentInput {
    FragmentInput {
        position: Vec3::new(0.0, 0.0, -3.0),
        normal: Vec3::new(0.0, 0.0, 1.0),
        tangent: Vec3::new(1.0, 0.0, 0.0),
        binormal: Vec3::new(0.0, 1.0, 0.0),
        uv: Vec2::new(0.25, 0.75),
    }
}

/// One white light two units along the surface normal, unit radiance at the surface
fn overhead_light() -> PerFrameData {
    PerFrameData::new(Vec4::new(AMBIENT, AMBIENT, AMBIENT, 1.0))
        .with_point_light(PointLight::new(
            Vec3::new(0.0, 0.0, -1.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            5.0,
            4.0,
        ))
        .unwrap()
}

#[test]
fn test_dielectric_under_overhead_light() {
    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let frame = overhead_light();
    let material = MaterialData::default().with_metallic_roughness(0.0, 0.5);
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);
    let fragment = facing_fragment();

    let surface = pipeline.surface_point(&draw, &fragment);
    let brdf = evaluate_brdf(&surface, &Vec3::new(0.0, 0.0, 1.0));

    // normal incidence: Fresnel is exactly F0
    assert_relative_eq!(brdf.fresnel, Vec3::repeat(0.04), epsilon = 1e-6);
    assert_relative_eq!(brdf.k_d, Vec3::repeat(0.96), epsilon = 1e-6);
    assert!(brdf.diffuse.x > 0.0);
    assert!(brdf.specular.x > 0.0);

    // D = 1 / (PI * a2) with a = 0.25 when N = H, G = 1 when N = V = L
    let ndf = 1.0 / (PI * 0.0625);
    let specular = 0.04 * ndf / 4.0;
    let diffuse = 0.96 / PI;
    let lit = specular + diffuse;

    let direct = pipeline.direct_lighting(&frame, &surface);
    assert_relative_eq!(direct, Vec3::repeat(lit), epsilon = 1e-5);

    let color = pipeline.shade(&frame, &draw, &fragment);
    let expected = (AMBIENT + lit) / (AMBIENT + lit + 1.0);
    assert_relative_eq!(color, Vec4::new(expected, expected, expected, 1.0), epsilon = 1e-5);
}

#[test]
fn test_metal_reflects_only_specular() {
    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let frame = overhead_light();
    let albedo = Vec4::new(0.9, 0.6, 0.3, 1.0);
    let material = MaterialData::default()
        .with_base_color(albedo)
        .with_metallic_roughness(1.0, 0.5);
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    let surface = pipeline.surface_point(&draw, &facing_fragment());
    let brdf = evaluate_brdf(&surface, &Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(brdf.k_d, Vec3::zeros());
    assert_eq!(brdf.diffuse, Vec3::zeros());
    assert_relative_eq!(brdf.fresnel, albedo.xyz(), epsilon = 1e-6);

    let direct = pipeline.direct_lighting(&frame, &surface);
    assert_relative_eq!(direct, brdf.specular * brdf.n_dot_l, epsilon = 1e-6);
}

#[test]
fn test_unlit_frame_is_ambient_plus_emissive() {
    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let ambient = Vec4::new(0.1, 0.2, 0.3, 1.0);
    let frame = PerFrameData::new(ambient);
    let base_color = Vec4::new(0.5, 0.5, 0.5, 0.8);
    let emissive = Vec3::new(0.25, 0.0, 0.5);
    let material = MaterialData::default()
        .with_base_color(base_color)
        .with_emissive(emissive);
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();
    let draw = DrawInputs::new(&material, &textures, &bank);

    assert_eq!(frame.light_count(), 0);
    let color = pipeline.shade(&frame, &draw, &facing_fragment());

    let expected = tone_map_reinhard(&(ambient.xyz().component_mul(&base_color.xyz()) + emissive));
    assert_relative_eq!(color.xyz(), expected, epsilon = 1e-6);
    assert_eq!(color.w, 0.8);
}

#[test]
fn test_emissive_texture_forces_yellow_base_color() {
    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let mut bank = TextureBank::new();
    let glow = bank.add_texture(Texture::solid(Vec4::new(0.0, 1.0, 0.0, 1.0)));
    let sampler = bank.add_sampler(SamplerParams::default());
    let textures = MaterialTextures::new(sampler).with(TextureSlot::Emissive, glow);
    let material = MaterialData::default()
        .with_base_color(Vec4::new(0.2, 0.3, 0.4, 0.5))
        .with_emissive(Vec3::new(1.0, 1.0, 1.0))
        .with_textures(TextureFlags::EMISSIVE);
    let draw = DrawInputs::new(&material, &textures, &bank);
    let frame = PerFrameData::new(Vec4::zeros());

    let surface = pipeline.surface_point(&draw, &facing_fragment());
    assert_eq!(surface.base_color, Vec4::new(1.0, 1.0, 0.0, 1.0));

    // zero ambient and no lights leave only the emissive term, at full alpha
    let color = pipeline.shade(&frame, &draw, &facing_fragment());
    assert_relative_eq!(color, Vec4::new(0.0, 0.5, 0.0, 1.0), epsilon = 1e-6);
}

#[test]
fn test_emissive_override_can_be_disabled() {
    let config = ShadingConfig::default().with_compat(CompatFlags {
        emissive_overrides_base_color: false,
        ..CompatFlags::default()
    });
    let pipeline = ShadingPipeline::new(&config).unwrap();
    let mut bank = TextureBank::new();
    let glow = bank.add_texture(Texture::solid(Vec4::new(1.0, 1.0, 1.0, 1.0)));
    let textures = MaterialTextures::default().with(TextureSlot::Emissive, glow);
    let base_color = Vec4::new(0.2, 0.3, 0.4, 0.5);
    let material = MaterialData::default()
        .with_base_color(base_color)
        .with_textures(TextureFlags::EMISSIVE);
    let draw = DrawInputs::new(&material, &textures, &bank);

    let surface = pipeline.surface_point(&draw, &facing_fragment());
    assert_eq!(surface.base_color, base_color);
}

#[test]
fn test_textured_material_modulates_factors() {
    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let mut bank = TextureBank::new();
    let sampler = bank.add_sampler(SamplerParams::default());
    let albedo = bank.add_texture(Texture::solid(Vec4::new(0.5, 0.25, 1.0, 0.5)));
    let metal_rough = bank.add_texture(Texture::solid(Vec4::new(0.0, 0.5, 1.0, 0.5)));
    let textures = MaterialTextures::new(sampler)
        .with(TextureSlot::BaseColor, albedo)
        .with(TextureSlot::MetallicRoughness, metal_rough);
    let material = MaterialData::default()
        .with_metallic_roughness(1.0, 0.5)
        .with_textures(TextureFlags::BASE_COLOR | TextureFlags::METALLIC_ROUGHNESS);
    let draw = DrawInputs::new(&material, &textures, &bank);

    let surface = pipeline.surface_point(&draw, &facing_fragment());
    assert_eq!(surface.base_color, Vec4::new(0.5, 0.25, 1.0, 0.5));
    assert_eq!(surface.metalness, 0.0);
    assert_eq!(surface.roughness, 0.25);
}

#[test]
fn test_uploaded_uniforms_shade_identically() {
    let pipeline = ShadingPipeline::new(&ShadingConfig::default()).unwrap();
    let frame = overhead_light();
    let material = MaterialData::default()
        .with_base_color(Vec4::new(0.8, 0.4, 0.2, 1.0))
        .with_metallic_roughness(0.5, 0.3);
    let textures = MaterialTextures::default();
    let bank = TextureBank::new();

    let frame_copy = PerFrameUniform::from_frame(&frame).to_frame().unwrap();
    let material_copy = MaterialData::from(&MaterialUniform::from(&material));

    let fragment = facing_fragment();
    let original = pipeline.shade(&frame, &DrawInputs::new(&material, &textures, &bank), &fragment);
    let uploaded = pipeline.shade(
        &frame_copy,
        &DrawInputs::new(&material_copy, &textures, &bank),
        &fragment,
    );
    assert_relative_eq!(original, uploaded, epsilon = 1e-6);
}
