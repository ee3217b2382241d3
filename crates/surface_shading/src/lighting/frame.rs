//! Per-frame lighting data shared by every fragment of a frame

use crate::error::ShadingResult;
use crate::foundation::math::{Vec3, Vec4};

use super::light_list::LightList;
use super::lights::{DirectionalLight, PointLight, SpotLight};

/// Lighting inputs set once per rendered frame by the host
#[derive(Debug, Clone, PartialEq)]
pub struct PerFrameData {
    /// Ambient light color applied uniformly
    pub ambient_light: Vec4,
    /// Active point lights
    pub point_lights: LightList<PointLight>,
    /// Active directional lights
    pub directional_lights: LightList<DirectionalLight>,
    /// Active spot lights
    pub spot_lights: LightList<SpotLight>,
}

impl PerFrameData {
    /// Create frame data with no lights and the given ambient color
    pub fn new(ambient_light: Vec4) -> Self {
        Self {
            ambient_light,
            point_lights: LightList::new(),
            directional_lights: LightList::new(),
            spot_lights: LightList::new(),
        }
    }

    /// Add a point light
    pub fn with_point_light(mut self, light: PointLight) -> ShadingResult<Self> {
        self.point_lights.push(light)?;
        Ok(self)
    }

    /// Add a directional light
    pub fn with_directional_light(mut self, light: DirectionalLight) -> ShadingResult<Self> {
        self.directional_lights.push(light)?;
        Ok(self)
    }

    /// Add a spot light
    pub fn with_spot_light(mut self, light: SpotLight) -> ShadingResult<Self> {
        self.spot_lights.push(light)?;
        Ok(self)
    }

    /// Total number of active lights across all kinds
    pub fn light_count(&self) -> usize {
        self.point_lights.len() + self.directional_lights.len() + self.spot_lights.len()
    }

    /// A dim room lit by two warm point lights, a fill directional and a spot
    pub fn indoor_warm() -> ShadingResult<Self> {
        Self::new(Vec4::new(0.03, 0.03, 0.03, 1.0))
            .with_point_light(PointLight::new(
                Vec3::new(2.0, 3.0, -2.0),
                Vec4::new(1.0, 0.9, 0.7, 1.0),
                10.0,
                20.0,
            ))?
            .with_point_light(PointLight::new(
                Vec3::new(-3.0, 1.0, -1.0),
                Vec4::new(0.6, 0.7, 1.0, 1.0),
                8.0,
                10.0,
            ))?
            .with_directional_light(DirectionalLight::new(
                Vec3::new(-0.3, -1.0, -0.5),
                Vec4::new(1.0, 0.95, 0.8, 1.0),
                0.8,
            ))?
            .with_spot_light(SpotLight::new(
                Vec3::new(0.0, 4.0, -4.0),
                Vec3::new(0.0, -1.0, -0.5),
                Vec4::new(1.0, 1.0, 1.0, 1.0),
                0.5,
                12.0,
                1.0,
            ))
    }
}

impl Default for PerFrameData {
    fn default() -> Self {
        Self::new(Vec4::new(0.03, 0.03, 0.03, 1.0))
    }
}
