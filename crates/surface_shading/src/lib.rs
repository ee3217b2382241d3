//! # Surface Shading
//!
//! Per-fragment physically-based surface shading for a real-time renderer.
//!
//! Given a fragment's interpolated geometry, its material parameters and
//! textures, and the frame's light lists, this crate computes the final
//! displayed color.
//!
//! ## Features
//!
//! - **Cook-Torrance BRDF**: GGX distribution, Smith geometry, Schlick Fresnel
//! - **Blinn-Phong**: Range-attenuated diffuse/specular for point, directional and spot lights
//! - **Normal Mapping**: Tangent-space normal maps through the TBN basis
//! - **Tone Mapping**: Reinhard, with optional gamma encoding
//! - **Configurable**: Model, light kinds and material quirks chosen from TOML/RON
//!
//! ## Quick Start
//!
//! ```rust
//! use surface_shading::prelude::*;
//!
//! fn main() -> Result<(), ShadingError> {
//!     let pipeline = ShadingPipeline::new(&ShadingConfig::default())?;
//!
//!     let frame = PerFrameData::new(Vec4::new(0.03, 0.03, 0.03, 1.0)).with_point_light(
//!         PointLight::new(Vec3::new(0.0, 2.0, -3.0), Vec4::new(1.0, 1.0, 1.0, 1.0), 10.0, 8.0),
//!     )?;
//!
//!     let material = MaterialData::default().with_metallic_roughness(0.0, 0.5);
//!     let textures = MaterialTextures::default();
//!     let bank = TextureBank::new();
//!     let draw = DrawInputs::new(&material, &textures, &bank);
//!
//!     let fragment = FragmentInput {
//!         position: Vec3::new(0.0, 0.0, -3.0),
//!         normal: Vec3::new(0.0, 1.0, 0.0),
//!         tangent: Vec3::new(1.0, 0.0, 0.0),
//!         binormal: Vec3::new(0.0, 0.0, -1.0),
//!         uv: Vec2::new(0.5, 0.5),
//!     };
//!
//!     let color = pipeline.shade(&frame, &draw, &fragment);
//!     assert!(color.x > 0.0 && color.x < 1.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod lighting;
pub mod material;
pub mod pipeline;
pub mod shading;
pub mod surface;
pub mod uniforms;

#[cfg(test)]
mod tests;

pub use error::{ShadingError, ShadingResult};
pub use pipeline::{DrawInputs, ShadingPipeline};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{
            CompatFlags, Config, ConfigFormat, EnabledLights, ShadingConfig, ShadingModel, ToneMapping,
        },
        error::{ShadingError, ShadingResult},
        foundation::math::{Mat3, Vec2, Vec3, Vec4},
        lighting::{DirectionalLight, LightKind, LightList, PerFrameData, PointLight, SpotLight},
        material::{
            MaterialData, MaterialTextures, SamplerHandle, SamplerParams, TexelEncoding, Texture,
            TextureBank, TextureFlags, TextureHandle, TextureSlot, TextureSource,
        },
        pipeline::{DrawInputs, ShadingPipeline},
        surface::{FragmentInput, SurfacePoint},
    };
}
