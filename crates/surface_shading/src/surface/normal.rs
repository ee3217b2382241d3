//! Shading normal resolution with optional tangent-space normal mapping

use crate::foundation::math::{Mat3, Vec3, Vec4};
use crate::material::{SamplerHandle, TextureHandle, TextureSource};

use super::FragmentInput;

/// Normal map binding handed to [`resolve_normal`]
#[derive(Debug)]
pub struct NormalTexture<'a, S: ?Sized> {
    /// Where texels come from
    pub source: &'a S,
    /// Normal map texture
    pub texture: TextureHandle,
    /// Shared sampler
    pub sampler: SamplerHandle,
    /// Scale for the unpacked x/y; `None` reads the texture raw
    pub scale: Option<f32>,
}

/// Matrix with columns {tangent, binormal, normal}, mapping tangent space into view space
pub fn tbn_matrix(tangent: &Vec3, binormal: &Vec3, normal: &Vec3) -> Mat3 {
    Mat3::from_columns(&[*tangent, *binormal, *normal])
}

/// Unpack a normal-map texel from [0, 1] to [-1, 1]
pub fn unpack_normal(texel: &Vec4) -> Vec3 {
    texel.xyz() * 2.0 - Vec3::repeat(1.0)
}

/// Shading normal for a fragment.
///
/// Without a normal texture this is the normalized geometry normal. Otherwise
/// the texel is unpacked, moved from tangent space through the TBN basis, and
/// normalized.
pub fn resolve_normal<S: TextureSource + ?Sized>(
    has_normal_texture: bool,
    fragment: &FragmentInput,
    normal_texture: &NormalTexture<'_, S>,
) -> Vec3 {
    if !has_normal_texture {
        return fragment.normal.normalize();
    }

    let texel = normal_texture
        .source
        .sample(normal_texture.texture, normal_texture.sampler, &fragment.uv);
    let mut tangent_normal = unpack_normal(&texel);
    if let Some(scale) = normal_texture.scale {
        tangent_normal.x *= scale;
        tangent_normal.y *= scale;
    }

    let tbn = tbn_matrix(&fragment.tangent, &fragment.binormal, &fragment.normal);
    (tbn * tangent_normal).normalize()
}
