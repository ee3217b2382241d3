//! Light source definitions
//!
//! All positions and directions are expressed in view space, the same space
//! the fragment inputs arrive in. Colors are RGBA; only RGB takes part in
//! lighting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec3, Vec4};

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Point light (like a lightbulb)
    Point,
    /// Directional light (like sunlight)
    Directional,
    /// Spot light (like a flashlight)
    Spot,
}

impl LightKind {
    /// Every light kind, in accumulation order
    pub const ALL: [Self; 3] = [Self::Point, Self::Directional, Self::Spot];
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Directional => "directional",
            Self::Spot => "spot",
        };
        f.write_str(name)
    }
}

/// Common interface of the three light structs
pub trait Light: Copy {
    /// Which list this light belongs to
    const KIND: LightKind;

    /// Light color (RGB)
    fn rgb(&self) -> Vec3;
}

/// Omnidirectional light from a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// View-space position
    pub position: Vec3,
    /// Light color
    pub color: Vec4,
    /// Distance at which the smoothstep falloff reaches zero
    pub range: f32,
    /// Light intensity
    pub intensity: f32,
}

impl PointLight {
    /// Create a point light
    pub fn new(position: Vec3, color: Vec4, range: f32, intensity: f32) -> Self {
        Self {
            position,
            color,
            range,
            intensity,
        }
    }
}

impl Light for PointLight {
    const KIND: LightKind = LightKind::Point;

    fn rgb(&self) -> Vec3 {
        self.color.xyz()
    }
}

/// Parallel light rays from an infinitely distant source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// View-space direction the light travels in (unit vector)
    pub direction: Vec3,
    /// Light color
    pub color: Vec4,
    /// Light intensity
    pub intensity: f32,
}

impl DirectionalLight {
    /// Create a directional light; `direction` is normalized
    pub fn new(direction: Vec3, color: Vec4, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }
}

impl Light for DirectionalLight {
    const KIND: LightKind = LightKind::Directional;

    fn rgb(&self) -> Vec3 {
        self.color.xyz()
    }
}

/// Cone of light from a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// View-space position
    pub position: Vec3,
    /// View-space direction the cone points in (unit vector)
    pub direction: Vec3,
    /// Light color
    pub color: Vec4,
    /// Half-angle of the cone in radians
    pub half_angle: f32,
    /// Distance at which the smoothstep falloff reaches zero
    pub range: f32,
    /// Light intensity
    pub intensity: f32,
}

impl SpotLight {
    /// Create a spot light; `direction` is normalized
    pub fn new(
        position: Vec3,
        direction: Vec3,
        color: Vec4,
        half_angle: f32,
        range: f32,
        intensity: f32,
    ) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            color,
            half_angle,
            range,
            intensity,
        }
    }
}

impl Light for SpotLight {
    const KIND: LightKind = LightKind::Spot;

    fn rgb(&self) -> Vec3 {
        self.color.xyz()
    }
}
