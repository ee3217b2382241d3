//! Uniform block layouts shared with the GPU
//!
//! These structures mirror the std140 blocks a host uploads for the same
//! shading inputs: the per-frame light block and the per-material parameter
//! block. Every field is a 16-byte row so the Rust and GLSL layouts agree
//! without implicit padding.
//!
//! Decoding a [`PerFrameUniform`] is where the unchecked GPU light counts are
//! validated against [`MAX_LIGHTS_PER_KIND`].

use bytemuck::{Pod, Zeroable};

use crate::error::{ShadingError, ShadingResult};
use crate::foundation::math::{Vec3, Vec4};
use crate::lighting::{
    DirectionalLight, Light, LightKind, LightList, PerFrameData, PointLight, SpotLight,
    MAX_LIGHTS_PER_KIND,
};
use crate::material::{MaterialData, TextureFlags};

/// Point light data for GPU uniform buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    /// Light position and range [x, y, z, range]
    pub position_range: [f32; 4],
    /// Light color [r, g, b, a]
    pub color: [f32; 4],
    /// Light intensity and padding [intensity, 0, 0, 0]
    pub intensity: [f32; 4],
}

/// Directional light data for GPU uniform buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightUniform {
    /// Light direction and intensity [x, y, z, intensity]
    pub direction_intensity: [f32; 4],
    /// Light color [r, g, b, a]
    pub color: [f32; 4],
}

/// Spot light data for GPU uniform buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpotLightUniform {
    /// Light position and range [x, y, z, range]
    pub position_range: [f32; 4],
    /// Light direction and cone half-angle [x, y, z, half_angle]
    pub direction_half_angle: [f32; 4],
    /// Light color [r, g, b, a]
    pub color: [f32; 4],
    /// Light intensity and padding [intensity, 0, 0, 0]
    pub intensity: [f32; 4],
}

/// Per-frame lighting block
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PerFrameUniform {
    /// Ambient light color
    pub ambient_light: [f32; 4],
    /// Number of active point lights
    pub point_light_count: u32,
    /// Number of active directional lights
    pub directional_light_count: u32,
    /// Number of active spot lights
    pub spot_light_count: u32,
    /// Padding for std140 alignment
    pub _padding: u32,
    /// Point light slots
    pub point_lights: [PointLightUniform; MAX_LIGHTS_PER_KIND],
    /// Directional light slots
    pub directional_lights: [DirectionalLightUniform; MAX_LIGHTS_PER_KIND],
    /// Spot light slots
    pub spot_lights: [SpotLightUniform; MAX_LIGHTS_PER_KIND],
}

/// Material parameter block
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Base color factor [r, g, b, a]
    pub base_color_factor: [f32; 4],
    /// Emissive factor [r, g, b, unused]
    pub emissive_factor: [f32; 4],
    /// [metallic, roughness, normal_texture_scale, occlusion_texture_strength]
    pub metallic_roughness_normal_occlusion: [f32; 4],
    /// Alpha cutoff
    pub alpha_cutoff: f32,
    /// [`TextureFlags`] bits
    pub texture_flags: u32,
    /// Padding to a 16-byte row
    pub _padding: [u32; 2],
}

fn vec3_row(v: &Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn vec4_row(v: &Vec4) -> [f32; 4] {
    [v.x, v.y, v.z, v.w]
}

fn row_vec3(row: &[f32; 4]) -> Vec3 {
    Vec3::new(row[0], row[1], row[2])
}

fn row_vec4(row: &[f32; 4]) -> Vec4 {
    Vec4::new(row[0], row[1], row[2], row[3])
}

impl From<&PointLight> for PointLightUniform {
    fn from(light: &PointLight) -> Self {
        Self {
            position_range: vec3_row(&light.position, light.range),
            color: vec4_row(&light.color),
            intensity: [light.intensity, 0.0, 0.0, 0.0],
        }
    }
}

impl From<&PointLightUniform> for PointLight {
    fn from(data: &PointLightUniform) -> Self {
        Self {
            position: row_vec3(&data.position_range),
            color: row_vec4(&data.color),
            range: data.position_range[3],
            intensity: data.intensity[0],
        }
    }
}

impl From<&DirectionalLight> for DirectionalLightUniform {
    fn from(light: &DirectionalLight) -> Self {
        Self {
            direction_intensity: vec3_row(&light.direction, light.intensity),
            color: vec4_row(&light.color),
        }
    }
}

impl From<&DirectionalLightUniform> for DirectionalLight {
    /// The direction is taken as stored; the uniform already holds a unit vector.
    fn from(data: &DirectionalLightUniform) -> Self {
        Self {
            direction: row_vec3(&data.direction_intensity),
            color: row_vec4(&data.color),
            intensity: data.direction_intensity[3],
        }
    }
}

impl From<&SpotLight> for SpotLightUniform {
    fn from(light: &SpotLight) -> Self {
        Self {
            position_range: vec3_row(&light.position, light.range),
            direction_half_angle: vec3_row(&light.direction, light.half_angle),
            color: vec4_row(&light.color),
            intensity: [light.intensity, 0.0, 0.0, 0.0],
        }
    }
}

impl From<&SpotLightUniform> for SpotLight {
    fn from(data: &SpotLightUniform) -> Self {
        Self {
            position: row_vec3(&data.position_range),
            direction: row_vec3(&data.direction_half_angle),
            color: row_vec4(&data.color),
            half_angle: data.direction_half_angle[3],
            range: data.position_range[3],
            intensity: data.intensity[0],
        }
    }
}

fn write_slots<L, U>(lights: &LightList<L>, slots: &mut [U; MAX_LIGHTS_PER_KIND]) -> u32
where
    L: Light,
    for<'a> U: From<&'a L>,
{
    for (slot, light) in slots.iter_mut().zip(lights.iter()) {
        *slot = U::from(light);
    }
    // bounded by MAX_LIGHTS_PER_KIND
    lights.len() as u32
}

fn read_slots<L, U>(count: u32, slots: &[U; MAX_LIGHTS_PER_KIND]) -> ShadingResult<LightList<L>>
where
    L: Light,
    for<'a> L: From<&'a U>,
{
    let active = usize::try_from(count)
        .ok()
        .filter(|n| *n <= MAX_LIGHTS_PER_KIND)
        .ok_or(ShadingError::InvalidLightCount {
            kind: L::KIND,
            count,
            capacity: MAX_LIGHTS_PER_KIND,
        })?;
    LightList::from_lights(slots[..active].iter().map(L::from))
}

impl PerFrameUniform {
    /// Pack frame data into the uniform layout; unused slots are zeroed
    pub fn from_frame(frame: &PerFrameData) -> Self {
        let mut uniform = Self::zeroed();
        uniform.ambient_light = vec4_row(&frame.ambient_light);
        uniform.point_light_count = write_slots(&frame.point_lights, &mut uniform.point_lights);
        uniform.directional_light_count =
            write_slots(&frame.directional_lights, &mut uniform.directional_lights);
        uniform.spot_light_count = write_slots(&frame.spot_lights, &mut uniform.spot_lights);
        uniform
    }

    /// Unpack into frame data, rejecting counts above capacity
    pub fn to_frame(&self) -> ShadingResult<PerFrameData> {
        let frame = PerFrameData {
            ambient_light: row_vec4(&self.ambient_light),
            point_lights: read_slots(self.point_light_count, &self.point_lights)?,
            directional_lights: read_slots(self.directional_light_count, &self.directional_lights)?,
            spot_lights: read_slots(self.spot_light_count, &self.spot_lights)?,
        };

        log::trace!(
            "Decoded per-frame uniform - Point: {}, Dir: {}, Spot: {}",
            frame.point_lights.len(),
            frame.directional_lights.len(),
            frame.spot_lights.len()
        );
        Ok(frame)
    }

    /// Count of active lights of one kind as stored in the block
    pub fn light_count(&self, kind: LightKind) -> u32 {
        match kind {
            LightKind::Point => self.point_light_count,
            LightKind::Directional => self.directional_light_count,
            LightKind::Spot => self.spot_light_count,
        }
    }

    /// Get a byte slice of this block for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<&MaterialData> for MaterialUniform {
    fn from(material: &MaterialData) -> Self {
        Self {
            base_color_factor: vec4_row(&material.base_color_factor),
            emissive_factor: vec3_row(&material.emissive_factor, 0.0),
            metallic_roughness_normal_occlusion: [
                material.metallic_factor,
                material.roughness_factor,
                material.normal_texture_scale,
                material.occlusion_texture_strength,
            ],
            alpha_cutoff: material.alpha_cutoff,
            texture_flags: material.texture_flags.bits(),
            _padding: [0; 2],
        }
    }
}

impl From<&MaterialUniform> for MaterialData {
    /// Unknown flag bits are dropped.
    fn from(data: &MaterialUniform) -> Self {
        let [metallic, roughness, normal_scale, occlusion_strength] =
            data.metallic_roughness_normal_occlusion;
        Self {
            base_color_factor: row_vec4(&data.base_color_factor),
            emissive_factor: row_vec3(&data.emissive_factor),
            metallic_factor: metallic,
            roughness_factor: roughness,
            normal_texture_scale: normal_scale,
            occlusion_texture_strength: occlusion_strength,
            alpha_cutoff: data.alpha_cutoff,
            texture_flags: TextureFlags::from_bits_truncate(data.texture_flags),
        }
    }
}

impl MaterialUniform {
    /// Get a byte slice of this block for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
