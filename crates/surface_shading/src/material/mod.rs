//! Material system
//!
//! Material parameters, texture bindings, the texture sampling seam, and
//! per-fragment material resolution.

pub mod data;
pub mod sampler;
pub mod texture;

pub use data::{MaterialData, MaterialTextures, TextureFlags, TextureSlot};
pub use sampler::{resolve_material, resolve_occlusion, ResolvedMaterial, EMISSIVE_OVERRIDE_BASE_COLOR};
pub use texture::{
    FilterMode, SamplerHandle, SamplerParams, TexelEncoding, Texture, TextureBank, TextureHandle,
    TextureSource, WrapMode,
};
