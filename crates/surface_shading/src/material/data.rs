//! Material parameters and texture bindings for a drawn surface

use bitflags::bitflags;

use crate::foundation::math::{Vec3, Vec4};

use super::texture::{SamplerHandle, TextureHandle};

bitflags! {
    /// Which optional material textures are bound
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureFlags: u32 {
        /// Base color (albedo) texture
        const BASE_COLOR = 1 << 0;
        /// Metalness in red, roughness in green
        const METALLIC_ROUGHNESS = 1 << 1;
        /// Tangent-space normal map
        const NORMAL = 1 << 2;
        /// Ambient occlusion in red
        const OCCLUSION = 1 << 3;
        /// Emissive color texture
        const EMISSIVE = 1 << 4;
    }
}

/// Material textures addressed by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base color texture
    BaseColor,
    /// Metallic-roughness texture
    MetallicRoughness,
    /// Normal map
    Normal,
    /// Occlusion texture
    Occlusion,
    /// Emissive texture
    Emissive,
}

impl TextureSlot {
    /// Flag that marks this slot as bound
    pub const fn flag(self) -> TextureFlags {
        match self {
            Self::BaseColor => TextureFlags::BASE_COLOR,
            Self::MetallicRoughness => TextureFlags::METALLIC_ROUGHNESS,
            Self::Normal => TextureFlags::NORMAL,
            Self::Occlusion => TextureFlags::OCCLUSION,
            Self::Emissive => TextureFlags::EMISSIVE,
        }
    }
}

/// Scalar material parameters, one instance per drawn surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialData {
    /// Base color multiplier (RGBA)
    pub base_color_factor: Vec4,
    /// Emissive color multiplier (RGB)
    pub emissive_factor: Vec3,
    /// Metalness multiplier, nominally in [0, 1]
    pub metallic_factor: f32,
    /// Roughness multiplier, nominally in [0, 1]
    pub roughness_factor: f32,
    /// Normal map x/y scale
    pub normal_texture_scale: f32,
    /// Occlusion blend strength
    pub occlusion_texture_strength: f32,
    /// Alpha test threshold
    pub alpha_cutoff: f32,
    /// Bound textures
    pub texture_flags: TextureFlags,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            base_color_factor: Vec4::new(1.0, 1.0, 1.0, 1.0),
            emissive_factor: Vec3::zeros(),
            metallic_factor: 0.0,
            roughness_factor: 0.5,
            normal_texture_scale: 1.0,
            occlusion_texture_strength: 1.0,
            alpha_cutoff: 0.5,
            texture_flags: TextureFlags::empty(),
        }
    }
}

impl MaterialData {
    /// Set the base color factor
    pub fn with_base_color(mut self, base_color: Vec4) -> Self {
        self.base_color_factor = base_color;
        self
    }

    /// Set the emissive factor
    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive_factor = emissive;
        self
    }

    /// Set metalness and roughness factors
    pub fn with_metallic_roughness(mut self, metallic: f32, roughness: f32) -> Self {
        self.metallic_factor = metallic;
        self.roughness_factor = roughness;
        self
    }

    /// Mark textures as bound
    pub fn with_textures(mut self, flags: TextureFlags) -> Self {
        self.texture_flags |= flags;
        self
    }

    /// Whether the texture for `slot` is bound
    pub fn has_texture(&self, slot: TextureSlot) -> bool {
        self.texture_flags.contains(slot.flag())
    }
}

/// Texture handles for every material slot plus the shared sampler.
///
/// A handle is only dereferenced when the matching [`TextureFlags`] bit is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialTextures {
    /// Sampler shared by every texture read
    pub sampler: SamplerHandle,
    /// Base color texture
    pub base_color: TextureHandle,
    /// Metallic-roughness texture
    pub metallic_roughness: TextureHandle,
    /// Normal map
    pub normal: TextureHandle,
    /// Occlusion texture
    pub occlusion: TextureHandle,
    /// Emissive texture
    pub emissive: TextureHandle,
}

impl MaterialTextures {
    /// Create bindings with every slot pointing at the null handle
    pub fn new(sampler: SamplerHandle) -> Self {
        Self {
            sampler,
            ..Default::default()
        }
    }

    /// Bind a texture to a slot
    pub fn with(mut self, slot: TextureSlot, texture: TextureHandle) -> Self {
        *self.slot_mut(slot) = texture;
        self
    }

    /// Handle bound to a slot
    pub const fn handle(&self, slot: TextureSlot) -> TextureHandle {
        match slot {
            TextureSlot::BaseColor => self.base_color,
            TextureSlot::MetallicRoughness => self.metallic_roughness,
            TextureSlot::Normal => self.normal,
            TextureSlot::Occlusion => self.occlusion,
            TextureSlot::Emissive => self.emissive,
        }
    }

    fn slot_mut(&mut self, slot: TextureSlot) -> &mut TextureHandle {
        match slot {
            TextureSlot::BaseColor => &mut self.base_color,
            TextureSlot::MetallicRoughness => &mut self.metallic_roughness,
            TextureSlot::Normal => &mut self.normal,
            TextureSlot::Occlusion => &mut self.occlusion,
            TextureSlot::Emissive => &mut self.emissive,
        }
    }
}
