//! Lambert diffuse plus Blinn-Phong specular
//!
//! Older light model kept alongside Cook-Torrance. Light contributions fade to
//! zero over the last quarter of a light's range, and spot lights blend across
//! the inner half of their cone.

use crate::foundation::math::{
    utils::{lerp, smoothstep},
    Vec3,
};
use crate::lighting::{DirectionalLight, Light, PointLight, SpotLight};
use crate::surface::SurfacePoint;

use super::evaluator::{light_vector, LightEvaluator};

/// Blinn-Phong exponent
pub const SPECULAR_EXPONENT: i32 = 4;

/// Fraction of the range at which falloff starts
pub const FALLOFF_START: f32 = 0.75;

/// Range attenuation: 1 up to 75% of `range`, smoothly down to 0 at `range`
pub fn attenuate(range: f32, distance: f32) -> f32 {
    1.0 - smoothstep(FALLOFF_START * range, range, distance)
}

/// Lambert diffuse term
pub fn diffuse_light(surface_to_light: &Vec3, normal: &Vec3, color: &Vec3) -> Vec3 {
    color * surface_to_light.dot(normal).max(0.0)
}

/// Blinn-Phong specular term
pub fn specular_light(
    surface_to_light: &Vec3,
    surface_to_eye: &Vec3,
    normal: &Vec3,
    color: &Vec3,
) -> Vec3 {
    let half_vector = (surface_to_light + surface_to_eye).normalize();
    color * normal.dot(&half_vector).max(0.0).powi(SPECULAR_EXPONENT)
}

/// Spot cone weight: 0 outside the cone, 1 once past the halfway blend towards the axis
pub fn spotlight_cone_falloff(surface_to_light: &Vec3, spot_direction: &Vec3, half_angle: f32) -> f32 {
    let cos_angle = (-spot_direction).dot(surface_to_light);
    let min_cos = half_angle.cos();
    let max_cos = lerp(min_cos, 1.0, 0.5);
    smoothstep(min_cos, max_cos, cos_angle)
}

/// Blinn-Phong evaluator for every light kind
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlinnPhong {
    /// Lower bound on light distance; `None` leaves coincident lights undefined
    pub min_light_distance: Option<f32>,
}

impl BlinnPhong {
    /// Create the evaluator
    pub fn new(min_light_distance: Option<f32>) -> Self {
        Self { min_light_distance }
    }

    fn diffuse_specular<L: Light>(&self, light: &L, surface_to_light: &Vec3, surface: &SurfacePoint) -> Vec3 {
        let color = light.rgb();
        diffuse_light(surface_to_light, &surface.normal, &color)
            + specular_light(surface_to_light, &surface.to_eye, &surface.normal, &color)
    }
}

impl LightEvaluator<PointLight> for BlinnPhong {
    fn evaluate(&self, light: &PointLight, surface: &SurfacePoint) -> Vec3 {
        let (surface_to_light, distance) =
            light_vector(&light.position, &surface.position, self.min_light_distance);
        let attenuation = attenuate(light.range, distance);
        self.diffuse_specular(light, &surface_to_light, surface) * attenuation * light.intensity
    }
}

impl LightEvaluator<DirectionalLight> for BlinnPhong {
    fn evaluate(&self, light: &DirectionalLight, surface: &SurfacePoint) -> Vec3 {
        let surface_to_light = -light.direction;
        self.diffuse_specular(light, &surface_to_light, surface) * light.intensity
    }
}

impl LightEvaluator<SpotLight> for BlinnPhong {
    fn evaluate(&self, light: &SpotLight, surface: &SurfacePoint) -> Vec3 {
        let (surface_to_light, distance) =
            light_vector(&light.position, &surface.position, self.min_light_distance);
        let attenuation = attenuate(light.range, distance);
        let cone = spotlight_cone_falloff(&surface_to_light, &light.direction, light.half_angle);
        self.diffuse_specular(light, &surface_to_light, surface) * attenuation * cone * light.intensity
    }
}
