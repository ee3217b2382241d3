//! Cook-Torrance microfacet BRDF
//!
//! GGX (Trowbridge-Reitz) normal distribution, Smith's method with the
//! Schlick-GGX approximation for geometry, and Fresnel-Schlick. Roughness is
//! the perceptual value; it is squared into alpha inside the distribution.
//! Inputs are not validated: out-of-range roughness or metalness feed straight
//! through the formulas.

use crate::foundation::math::{constants::PI, utils::lerp_vec3, Vec3};
use crate::lighting::{Light, PointLight};
use crate::surface::SurfacePoint;

use super::evaluator::{light_vector, LightEvaluator};

/// Reflectance at normal incidence for dielectrics
pub const DIELECTRIC_F0: f32 = 0.04;

/// Floor for the specular denominator `4 * NdotV * NdotL`
pub const MIN_SPECULAR_DENOMINATOR: f32 = 0.001;

/// GGX normal distribution
pub fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let n_dot_h2 = n_dot_h * n_dot_h;

    let denom = n_dot_h2 * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

/// Schlick-GGX geometry term for one direction, `k = (roughness + 1)^2 / 8`
pub fn geometry_schlick_ggx(n_dot_x: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = r * r / 8.0;
    n_dot_x / (n_dot_x * (1.0 - k) + k)
}

/// Smith geometry term combining view and light directions
pub fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    geometry_schlick_ggx(n_dot_v, roughness) * geometry_schlick_ggx(n_dot_l, roughness)
}

/// Fresnel-Schlick approximation
pub fn fresnel_schlick(cos_theta: f32, f0: &Vec3) -> Vec3 {
    f0 + (Vec3::repeat(1.0) - f0) * (1.0 - cos_theta).powi(5)
}

/// F0: 4% for dielectrics, the base color for metals, blended by metalness
pub fn base_reflectivity(albedo: &Vec3, metalness: f32) -> Vec3 {
    lerp_vec3(&Vec3::repeat(DIELECTRIC_F0), albedo, metalness)
}

/// Specular denominator, floored to keep grazing angles finite
pub fn specular_denominator(n_dot_v: f32, n_dot_l: f32) -> f32 {
    (4.0 * n_dot_v * n_dot_l).max(MIN_SPECULAR_DENOMINATOR)
}

/// BRDF terms for one light direction, before radiance and the cosine factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrdfSample {
    /// Fresnel reflectance
    pub fresnel: Vec3,
    /// Diffuse weight `(1 - F) * (1 - metalness)`
    pub k_d: Vec3,
    /// Lambertian term `k_d * albedo / PI`
    pub diffuse: Vec3,
    /// Specular term `D * G * F / max(4 * NdotV * NdotL, 0.001)`
    pub specular: Vec3,
    /// `max(dot(N, L), 0)`
    pub n_dot_l: f32,
}

/// Evaluate the BRDF at `surface` for light arriving from `surface_to_light`
pub fn evaluate_brdf(surface: &SurfacePoint, surface_to_light: &Vec3) -> BrdfSample {
    let n = &surface.normal;
    let v = &surface.to_eye;
    let h = (surface_to_light + v).normalize();
    let albedo = surface.albedo();

    let n_dot_v = n.dot(v).max(0.0);
    let n_dot_l = n.dot(surface_to_light).max(0.0);
    let n_dot_h = n.dot(&h).max(0.0);
    let h_dot_v = h.dot(v).max(0.0);

    let f0 = base_reflectivity(&albedo, surface.metalness);
    let ndf = distribution_ggx(n_dot_h, surface.roughness);
    let g = geometry_smith(n_dot_v, n_dot_l, surface.roughness);
    let fresnel = fresnel_schlick(h_dot_v, &f0);

    let specular = fresnel * (ndf * g / specular_denominator(n_dot_v, n_dot_l));

    let k_d = (Vec3::repeat(1.0) - fresnel) * (1.0 - surface.metalness);
    let diffuse = k_d.component_mul(&albedo) / PI;

    BrdfSample {
        fresnel,
        k_d,
        diffuse,
        specular,
        n_dot_l,
    }
}

/// Cook-Torrance evaluator. Only point lights have an implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CookTorrance {
    /// Lower bound on light distance; `None` leaves coincident lights undefined
    pub min_light_distance: Option<f32>,
}

impl CookTorrance {
    /// Create the evaluator
    pub fn new(min_light_distance: Option<f32>) -> Self {
        Self { min_light_distance }
    }
}

impl LightEvaluator<PointLight> for CookTorrance {
    /// Inverse-square falloff with no range cutoff
    fn evaluate(&self, light: &PointLight, surface: &SurfacePoint) -> Vec3 {
        let (surface_to_light, distance) =
            light_vector(&light.position, &surface.position, self.min_light_distance);
        let radiance = light.rgb() * light.intensity / (distance * distance);

        let brdf = evaluate_brdf(surface, &surface_to_light);
        (brdf.diffuse + brdf.specular).component_mul(&radiance) * brdf.n_dot_l
    }
}
