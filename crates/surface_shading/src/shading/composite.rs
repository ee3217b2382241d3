//! Final color composition: ambient, direct and emissive terms, then tone mapping

use crate::config::ToneMapping;
use crate::foundation::math::{utils::rgba, Vec3, Vec4};

/// Post-composition settings resolved from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeOptions {
    /// Tone mapping operator
    pub tone_mapping: ToneMapping,
    /// Display gamma to encode for; `None` leaves the output linear
    pub gamma: Option<f32>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            tone_mapping: ToneMapping::Reinhard,
            gamma: None,
        }
    }
}

/// Reinhard operator, `color / (color + 1)` per channel
pub fn tone_map_reinhard(color: &Vec3) -> Vec3 {
    color.map(|c| c / (c + 1.0))
}

/// Encode a linear color for a display with the given gamma
pub fn gamma_correct(color: &Vec3, gamma: f32) -> Vec3 {
    color.map(|c| c.powf(1.0 / gamma))
}

/// Apply the configured tone mapping operator
pub fn tone_map(color: &Vec3, tone_mapping: ToneMapping) -> Vec3 {
    match tone_mapping {
        ToneMapping::Reinhard => tone_map_reinhard(color),
        ToneMapping::None => *color,
    }
}

/// Combine the lighting terms into the output color.
///
/// Both ambient and accumulated light are modulated by the base color before
/// emissive is added. Alpha comes straight from `base_color`.
pub fn compose(
    ambient: &Vec4,
    base_color: &Vec4,
    accumulated_light: &Vec3,
    emissive: &Vec4,
    options: &CompositeOptions,
) -> Vec4 {
    let albedo = base_color.xyz();
    let ambient_term = ambient.xyz().component_mul(&albedo);
    let lit_term = accumulated_light.component_mul(&albedo);
    let color = ambient_term + lit_term + emissive.xyz();

    let mut mapped = tone_map(&color, options.tone_mapping);
    if let Some(gamma) = options.gamma {
        mapped = gamma_correct(&mapped, gamma);
    }

    rgba(&mapped, base_color.w)
}
