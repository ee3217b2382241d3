//! Per-fragment surface inputs
//!
//! [`FragmentInput`] is what upstream geometry processing interpolates for a
//! fragment. [`SurfacePoint`] is the resolved surface every light evaluator
//! sees: position, shading normal, view direction, and material values.

pub mod normal;

pub use normal::{resolve_normal, tbn_matrix, unpack_normal, NormalTexture};

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::material::ResolvedMaterial;

/// Interpolated per-fragment inputs, all in view space.
///
/// Tangent, binormal and normal are expected to be mutually orthogonal; the
/// binormal's handedness is whatever the mesh was authored with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInput {
    /// View-space position
    pub position: Vec3,
    /// View-space geometry normal
    pub normal: Vec3,
    /// View-space tangent
    pub tangent: Vec3,
    /// View-space binormal (bitangent)
    pub binormal: Vec3,
    /// Texture coordinate
    pub uv: Vec2,
}

impl FragmentInput {
    /// Direction from the surface towards the eye.
    ///
    /// The eye sits at the view-space origin.
    pub fn surface_to_eye(&self) -> Vec3 {
        (-self.position).normalize()
    }
}

/// Everything a light evaluator needs about the shaded point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// View-space position
    pub position: Vec3,
    /// Unit shading normal
    pub normal: Vec3,
    /// Unit direction from the surface towards the eye
    pub to_eye: Vec3,
    /// Base color
    pub base_color: Vec4,
    /// Metalness
    pub metalness: f32,
    /// Perceptual roughness
    pub roughness: f32,
}

impl SurfacePoint {
    /// Combine a fragment, its resolved shading normal and material
    pub fn new(fragment: &FragmentInput, normal: Vec3, material: &ResolvedMaterial) -> Self {
        Self {
            position: fragment.position,
            normal,
            to_eye: fragment.surface_to_eye(),
            base_color: material.base_color,
            metalness: material.metalness,
            roughness: material.roughness,
        }
    }

    /// Base color RGB
    pub fn albedo(&self) -> Vec3 {
        self.base_color.xyz()
    }
}
