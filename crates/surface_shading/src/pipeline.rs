//! Fragment shading pipeline
//!
//! A [`ShadingPipeline`] is built once from a [`ShadingConfig`] and then shades
//! any number of fragments. Building is the only fallible step: it rejects
//! configurations the selected model cannot honor. Shading itself is a pure
//! function of its arguments, so a pipeline can be shared across threads and
//! every fragment evaluated independently.
//!
//! Per fragment the stages run strictly forward:
//!
//! 1. resolve material values from factors and bound textures
//! 2. resolve the shading normal, optionally through the normal map
//! 3. accumulate every enabled light through the selected evaluator
//! 4. compose ambient, direct and emissive terms and tone map

use crate::config::{CompatFlags, Config, EnabledLights, ShadingConfig, ShadingModel};
use crate::error::{ShadingError, ShadingResult};
use crate::foundation::math::{Vec3, Vec4};
use crate::lighting::{LightKind, PerFrameData};
use crate::material::{
    resolve_material, resolve_occlusion, MaterialData, MaterialTextures, TextureSlot, TextureSource,
};
use crate::shading::{accumulate, compose, BlinnPhong, CompositeOptions, CookTorrance};
use crate::surface::{resolve_normal, FragmentInput, NormalTexture, SurfacePoint};

/// Light evaluation strategy chosen at build time
#[derive(Debug, Clone, Copy, PartialEq)]
enum Evaluator {
    BlinnPhong(BlinnPhong),
    CookTorrance(CookTorrance),
}

/// Material and texture bindings for one draw
#[derive(Debug)]
pub struct DrawInputs<'a, S: ?Sized> {
    /// Material parameter block
    pub material: &'a MaterialData,
    /// Texture handles and sampler
    pub textures: &'a MaterialTextures,
    /// Where texture reads go
    pub source: &'a S,
}

impl<'a, S: ?Sized> DrawInputs<'a, S> {
    /// Bundle the bindings for a draw
    pub fn new(material: &'a MaterialData, textures: &'a MaterialTextures, source: &'a S) -> Self {
        Self {
            material,
            textures,
            source,
        }
    }
}

impl<S: ?Sized> Clone for DrawInputs<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for DrawInputs<'_, S> {}

/// Configured fragment shader
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingPipeline {
    evaluator: Evaluator,
    lights: EnabledLights,
    composite: CompositeOptions,
    compat: CompatFlags,
}

impl ShadingPipeline {
    /// Build a pipeline, validating the configuration
    pub fn new(config: &ShadingConfig) -> ShadingResult<Self> {
        config.validate()?;

        if let Some(kind) = config.lights.iter().find(|kind| !config.model.supports(*kind)) {
            log::warn!(
                "{:?} shading cannot evaluate {} lights; disable them or use blinn_phong",
                config.model,
                kind
            );
            return Err(ShadingError::UnsupportedLight {
                model: config.model,
                kind,
            });
        }

        if config.compat.emissive_overrides_base_color {
            log::debug!("Emissive textures replace base color with opaque yellow");
        }
        if config.compat.apply_normal_texture_scale || config.compat.apply_occlusion {
            log::debug!(
                "Material extensions enabled - normal scale: {}, occlusion: {}",
                config.compat.apply_normal_texture_scale,
                config.compat.apply_occlusion
            );
        }

        let evaluator = match config.model {
            ShadingModel::BlinnPhong => Evaluator::BlinnPhong(BlinnPhong::new(config.min_light_distance)),
            ShadingModel::CookTorrance => {
                Evaluator::CookTorrance(CookTorrance::new(config.min_light_distance))
            }
        };
        let gamma = config.gamma_correction.then_some(config.gamma);

        log::debug!(
            "Built shading pipeline: model={:?}, lights={:?}, tone_mapping={:?}, gamma={:?}",
            config.model,
            config.lights,
            config.tone_mapping,
            gamma
        );

        Ok(Self {
            evaluator,
            lights: config.lights,
            composite: CompositeOptions {
                tone_mapping: config.tone_mapping,
                gamma,
            },
            compat: config.compat,
        })
    }

    /// Selected light evaluation model
    pub fn model(&self) -> ShadingModel {
        match self.evaluator {
            Evaluator::BlinnPhong(_) => ShadingModel::BlinnPhong,
            Evaluator::CookTorrance(_) => ShadingModel::CookTorrance,
        }
    }

    /// Whether lights of `kind` contribute to the output
    pub fn is_enabled(&self, kind: LightKind) -> bool {
        self.lights.contains(kind)
    }

    /// Resolve the surface a fragment presents to the light evaluators
    pub fn surface_point<S: TextureSource + ?Sized>(
        &self,
        draw: &DrawInputs<'_, S>,
        fragment: &FragmentInput,
    ) -> SurfacePoint {
        self.resolve_surface(draw, fragment).0
    }

    /// Surface point plus the fragment's emissive color
    fn resolve_surface<S: TextureSource + ?Sized>(
        &self,
        draw: &DrawInputs<'_, S>,
        fragment: &FragmentInput,
    ) -> (SurfacePoint, Vec4) {
        let material = resolve_material(
            draw.material,
            draw.textures,
            draw.source,
            &fragment.uv,
            &self.compat,
        );

        let normal_texture = NormalTexture {
            source: draw.source,
            texture: draw.textures.normal,
            sampler: draw.textures.sampler,
            scale: self
                .compat
                .apply_normal_texture_scale
                .then_some(draw.material.normal_texture_scale),
        };
        let normal = resolve_normal(
            draw.material.has_texture(TextureSlot::Normal),
            fragment,
            &normal_texture,
        );

        (SurfacePoint::new(fragment, normal, &material), material.emissive)
    }

    /// Sum of every enabled light's contribution at `surface`
    pub fn direct_lighting(&self, frame: &PerFrameData, surface: &SurfacePoint) -> Vec3 {
        let mut total = Vec3::zeros();
        match &self.evaluator {
            Evaluator::BlinnPhong(evaluator) => {
                if self.lights.point {
                    total += accumulate(&frame.point_lights, evaluator, surface);
                }
                if self.lights.directional {
                    total += accumulate(&frame.directional_lights, evaluator, surface);
                }
                if self.lights.spot {
                    total += accumulate(&frame.spot_lights, evaluator, surface);
                }
            }
            Evaluator::CookTorrance(evaluator) => {
                // other kinds were rejected when the pipeline was built
                if self.lights.point {
                    total += accumulate(&frame.point_lights, evaluator, surface);
                }
            }
        }
        total
    }

    /// Shade one fragment
    pub fn shade<S: TextureSource + ?Sized>(
        &self,
        frame: &PerFrameData,
        draw: &DrawInputs<'_, S>,
        fragment: &FragmentInput,
    ) -> Vec4 {
        let (surface, emissive) = self.resolve_surface(draw, fragment);
        let light = self.direct_lighting(frame, &surface);
        let ambient = self.ambient(frame, draw, fragment);

        compose(&ambient, &surface.base_color, &light, &emissive, &self.composite)
    }

    fn ambient<S: TextureSource + ?Sized>(
        &self,
        frame: &PerFrameData,
        draw: &DrawInputs<'_, S>,
        fragment: &FragmentInput,
    ) -> Vec4 {
        if !self.compat.apply_occlusion {
            return frame.ambient_light;
        }
        let occlusion = resolve_occlusion(draw.material, draw.textures, draw.source, &fragment.uv);
        let rgb = frame.ambient_light.xyz() * occlusion;
        Vec4::new(rgb.x, rgb.y, rgb.z, frame.ambient_light.w)
    }
}

impl Default for ShadingPipeline {
    fn default() -> Self {
        Self {
            evaluator: Evaluator::CookTorrance(CookTorrance::default()),
            lights: EnabledLights::POINT_ONLY,
            composite: CompositeOptions::default(),
            compat: CompatFlags::default(),
        }
    }
}
