//! Light evaluation interface and multi-light accumulation

use crate::foundation::math::Vec3;
use crate::lighting::{Light, LightList};
use crate::surface::SurfacePoint;

/// Outgoing radiance towards the eye from one light of kind `L`
pub trait LightEvaluator<L: Light> {
    /// Contribution of `light` at `surface` (RGB)
    fn evaluate(&self, light: &L, surface: &SurfacePoint) -> Vec3;
}

/// Unit direction from the surface towards a positional light, and the distance to it.
///
/// With `min_distance` set the distance is floored before it is used, so a
/// light sitting exactly on the surface yields a zero direction and finite
/// falloff instead of NaN.
pub fn light_vector(light_position: &Vec3, surface_position: &Vec3, min_distance: Option<f32>) -> (Vec3, f32) {
    let offset = light_position - surface_position;
    let distance = match min_distance {
        Some(floor) => offset.norm().max(floor),
        None => offset.norm(),
    };
    (offset / distance, distance)
}

/// Sum the contributions of every active light in `lights`.
///
/// No light is skipped for being far away.
// TODO: cull point/spot lights whose range does not reach the surface before evaluating them
pub fn accumulate<L, E>(lights: &LightList<L>, evaluator: &E, surface: &SurfacePoint) -> Vec3
where
    L: Light,
    E: LightEvaluator<L> + ?Sized,
{
    lights
        .iter()
        .fold(Vec3::zeros(), |sum, light| sum + evaluator.evaluate(light, surface))
}
