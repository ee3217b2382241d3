//! Texture sampling for material inputs
//!
//! Shading treats sampling as an opaque read: [`TextureSource::sample`] takes a
//! texture handle, a sampler handle and a UV and returns RGBA. [`TextureBank`]
//! is an in-memory implementation with nearest/linear filtering and the usual
//! wrap modes.

use std::path::Path;

use crate::error::{ShadingError, ShadingResult};
use crate::foundation::math::{Vec2, Vec4};

/// Handle for a texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

/// Handle for a sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SamplerHandle(pub u32);

/// Opaque texture read used by the material sampler and normal resolver
pub trait TextureSource {
    /// Sample `texture` at `uv` through `sampler`
    fn sample(&self, texture: TextureHandle, sampler: SamplerHandle, uv: &Vec2) -> Vec4;
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Nearest neighbor filtering
    Nearest,
    /// Bilinear filtering
    #[default]
    Linear,
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Repeat the texture
    #[default]
    Repeat,
    /// Mirror the texture
    MirroredRepeat,
    /// Clamp to edge
    ClampToEdge,
}

impl WrapMode {
    fn apply(self, coord: i64, size: u32) -> u32 {
        let size = i64::from(size);
        let wrapped = match self {
            Self::Repeat => coord.rem_euclid(size),
            Self::MirroredRepeat => {
                let period = coord.rem_euclid(size * 2);
                if period < size {
                    period
                } else {
                    size * 2 - 1 - period
                }
            }
            Self::ClampToEdge => coord.clamp(0, size - 1),
        };
        // in [0, size) by construction
        u32::try_from(wrapped).unwrap_or(0)
    }
}

/// Sampler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerParams {
    /// Texture filtering mode
    pub filter_mode: FilterMode,
    /// Texture wrapping mode
    pub wrap_mode: WrapMode,
}

/// How 8-bit texel data is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexelEncoding {
    /// Values are used as stored (data textures: normals, metallic-roughness)
    Linear,
    /// Color channels are sRGB-encoded; alpha stays linear
    Srgb,
}

/// Texture decoded to linear floating point RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl Texture {
    /// 1x1 texture of a single color
    pub fn solid(color: Vec4) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Build from row-major floating point texels
    pub fn from_texels(width: u32, height: u32, texels: Vec<Vec4>) -> ShadingResult<Self> {
        let expected = (width as usize) * (height as usize);
        if width == 0 || height == 0 || texels.len() != expected {
            return Err(ShadingError::Texture(format!(
                "{}x{} texture needs {} texels, got {}",
                width,
                height,
                expected,
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Build from tightly packed RGBA8 data
    pub fn from_rgba8(
        width: u32,
        height: u32,
        data: &[u8],
        encoding: TexelEncoding,
    ) -> ShadingResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(ShadingError::Texture(format!(
                "{}x{} RGBA8 texture needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }

        let texels = data
            .chunks_exact(4)
            .map(|px| {
                let decode = |channel: u8| {
                    let value = f32::from(channel) / 255.0;
                    match encoding {
                        TexelEncoding::Linear => value,
                        TexelEncoding::Srgb => srgb_to_linear(value),
                    }
                };
                Vec4::new(
                    decode(px[0]),
                    decode(px[1]),
                    decode(px[2]),
                    f32::from(px[3]) / 255.0,
                )
            })
            .collect();
        Self::from_texels(width, height, texels)
    }

    /// Convert a decoded image
    pub fn from_image(image: &image::DynamicImage, encoding: TexelEncoding) -> ShadingResult<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.as_raw(), encoding)
    }

    /// Load an image file from disk
    pub fn load<P: AsRef<Path>>(path: P, encoding: TexelEncoding) -> ShadingResult<Self> {
        let path_ref = path.as_ref();

        log::debug!("Loading texture from: {:?}", path_ref);

        let image = image::open(path_ref)
            .map_err(|e| ShadingError::Texture(format!("Failed to load image: {}", e)))?;
        let texture = Self::from_image(&image, encoding)?;

        log::info!(
            "Loaded texture {}x{} from {:?}",
            texture.width,
            texture.height,
            path_ref
        );
        Ok(texture)
    }

    /// Texture width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels
    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.texels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Sample at `uv` with the given sampler state
    pub fn sample(&self, params: &SamplerParams, uv: &Vec2) -> Vec4 {
        let u = uv.x * self.width as f32;
        let v = uv.y * self.height as f32;

        match params.filter_mode {
            FilterMode::Nearest => {
                let x = params.wrap_mode.apply(u.floor() as i64, self.width);
                let y = params.wrap_mode.apply(v.floor() as i64, self.height);
                self.texel(x, y)
            }
            FilterMode::Linear => {
                // texel centers sit at half-integer coordinates
                let u = u - 0.5;
                let v = v - 0.5;
                let x0 = u.floor();
                let y0 = v.floor();
                let tx = u - x0;
                let ty = v - y0;

                // float-to-int casts saturate for huge UVs; the neighbor must not overflow
                let (x0, y0) = (x0 as i64, y0 as i64);
                let xa = params.wrap_mode.apply(x0, self.width);
                let xb = params.wrap_mode.apply(x0.saturating_add(1), self.width);
                let ya = params.wrap_mode.apply(y0, self.height);
                let yb = params.wrap_mode.apply(y0.saturating_add(1), self.height);

                let top = self.texel(xa, ya).lerp(&self.texel(xb, ya), tx);
                let bottom = self.texel(xa, yb).lerp(&self.texel(xb, yb), tx);
                top.lerp(&bottom, ty)
            }
        }
    }
}

fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// In-memory texture and sampler storage
#[derive(Debug, Clone, Default)]
pub struct TextureBank {
    textures: Vec<Texture>,
    samplers: Vec<SamplerParams>,
}

impl TextureBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a texture and return its handle
    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(texture);
        handle
    }

    /// Store sampler state and return its handle
    pub fn add_sampler(&mut self, params: SamplerParams) -> SamplerHandle {
        let handle = SamplerHandle(self.samplers.len() as u32);
        self.samplers.push(params);
        handle
    }

    /// Look up a texture
    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0 as usize)
    }

    /// Number of stored textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl TextureSource for TextureBank {
    /// Unknown texture handles read as opaque white; unknown samplers use defaults.
    fn sample(&self, texture: TextureHandle, sampler: SamplerHandle, uv: &Vec2) -> Vec4 {
        let params = self
            .samplers
            .get(sampler.0 as usize)
            .copied()
            .unwrap_or_default();
        self.texture(texture)
            .map_or_else(|| Vec4::new(1.0, 1.0, 1.0, 1.0), |tex| tex.sample(&params, uv))
    }
}
