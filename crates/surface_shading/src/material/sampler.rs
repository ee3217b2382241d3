//! Material resolution: factors combined with optionally bound textures

use crate::config::CompatFlags;
use crate::foundation::math::{utils::rgba, Vec2, Vec4};

use super::data::{MaterialData, MaterialTextures, TextureSlot};
use super::texture::TextureSource;

/// Opaque yellow written over the base color when an emissive texture is bound
/// and [`CompatFlags::emissive_overrides_base_color`] is set.
pub const EMISSIVE_OVERRIDE_BASE_COLOR: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

/// Per-fragment material inputs after texture resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMaterial {
    /// Base color (RGBA); alpha becomes the output alpha
    pub base_color: Vec4,
    /// Emissive color; alpha is carried but unused
    pub emissive: Vec4,
    /// Metalness
    pub metalness: f32,
    /// Perceptual roughness
    pub roughness: f32,
}

/// Resolve base color, emissive, metalness and roughness for one fragment.
///
/// A texture is sampled only if its flag is set in `material.texture_flags`.
pub fn resolve_material<S: TextureSource + ?Sized>(
    material: &MaterialData,
    textures: &MaterialTextures,
    source: &S,
    uv: &Vec2,
    compat: &CompatFlags,
) -> ResolvedMaterial {
    let sample = |slot: TextureSlot| source.sample(textures.handle(slot), textures.sampler, uv);

    let mut base_color = material.base_color_factor;
    if material.has_texture(TextureSlot::BaseColor) {
        base_color.component_mul_assign(&sample(TextureSlot::BaseColor));
    }

    let mut emissive = rgba(&material.emissive_factor, 1.0);
    if material.has_texture(TextureSlot::Emissive) {
        emissive.component_mul_assign(&sample(TextureSlot::Emissive));
        if compat.emissive_overrides_base_color {
            base_color = EMISSIVE_OVERRIDE_BASE_COLOR;
        }
    }

    let mut metalness = material.metallic_factor;
    let mut roughness = material.roughness_factor;
    if material.has_texture(TextureSlot::MetallicRoughness) {
        let texel = sample(TextureSlot::MetallicRoughness);
        metalness *= texel.x;
        roughness *= texel.y;
    }

    ResolvedMaterial {
        base_color,
        emissive,
        metalness,
        roughness,
    }
}

/// Ambient occlusion factor for the fragment, 1.0 when no occlusion texture is bound.
///
/// Blends towards the texture's red channel by `occlusion_texture_strength`.
pub fn resolve_occlusion<S: TextureSource + ?Sized>(
    material: &MaterialData,
    textures: &MaterialTextures,
    source: &S,
    uv: &Vec2,
) -> f32 {
    if !material.has_texture(TextureSlot::Occlusion) {
        return 1.0;
    }
    let occlusion = source
        .sample(textures.occlusion, textures.sampler, uv)
        .x;
    1.0 + material.occlusion_texture_strength * (occlusion - 1.0)
}
