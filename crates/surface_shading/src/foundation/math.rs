//! Math utilities and types
//!
//! Provides the vector and matrix aliases used throughout shading, plus the
//! scalar helpers (`lerp`, `smoothstep`) that mirror their shading-language
//! counterparts.

pub use nalgebra::{Matrix3, Vector2, Vector3, Vector4};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (positions, directions, RGB colors)
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3, Vec4};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation between two vectors
    pub fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Hermite interpolation between `edge0` and `edge1`.
    ///
    /// Returns 0 below `edge0`, 1 above `edge1`, and a smooth cubic in between.
    /// Behavior for `edge0 >= edge1` follows the same formula and is left to the caller.
    pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
        let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }

    /// Build an RGBA color from RGB and alpha
    pub fn rgba(rgb: &Vec3, alpha: f32) -> Vec4 {
        Vec4::new(rgb.x, rgb.y, rgb.z, alpha)
    }
}
