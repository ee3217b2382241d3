//! Shading configuration
//!
//! Selects the light evaluation model, which light kinds take part in
//! accumulation, how the final color is mapped to display range, and which
//! historical quirks of the material path are reproduced.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::lighting::LightKind;

/// Light evaluation model used for every enabled light kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    /// Lambert diffuse plus Blinn-Phong specular with smoothstep range falloff
    BlinnPhong,
    /// Cook-Torrance microfacet BRDF (GGX, Smith, Schlick) with inverse-square falloff
    #[default]
    CookTorrance,
}

impl ShadingModel {
    /// Whether this model has an evaluator for the given light kind
    pub const fn supports(self, kind: LightKind) -> bool {
        match self {
            Self::BlinnPhong => true,
            Self::CookTorrance => matches!(kind, LightKind::Point),
        }
    }
}

/// Operator applied to the composed HDR color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// `color / (color + 1)` per channel
    #[default]
    Reinhard,
    /// Pass the HDR color through unchanged
    None,
}

/// Light kinds that take part in accumulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledLights {
    /// Accumulate point lights
    pub point: bool,
    /// Accumulate directional lights
    pub directional: bool,
    /// Accumulate spot lights
    pub spot: bool,
}

impl EnabledLights {
    /// Only point lights
    pub const POINT_ONLY: Self = Self {
        point: true,
        directional: false,
        spot: false,
    };

    /// Every light kind
    pub const ALL: Self = Self {
        point: true,
        directional: true,
        spot: true,
    };

    /// Whether a light kind is enabled
    pub const fn contains(&self, kind: LightKind) -> bool {
        match kind {
            LightKind::Point => self.point,
            LightKind::Directional => self.directional,
            LightKind::Spot => self.spot,
        }
    }

    /// Iterate the enabled kinds in accumulation order
    pub fn iter(&self) -> impl Iterator<Item = LightKind> + '_ {
        LightKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }
}

impl Default for EnabledLights {
    fn default() -> Self {
        Self::POINT_ONLY
    }
}

/// Reproduction switches for behavior of the material path that looks unintended.
///
/// Defaults reproduce the established output exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatFlags {
    /// A bound emissive texture replaces the base color with opaque yellow
    pub emissive_overrides_base_color: bool,
    /// Scale the unpacked normal-map x/y by `normal_texture_scale`
    pub apply_normal_texture_scale: bool,
    /// Attenuate the ambient term by the occlusion texture and its strength
    pub apply_occlusion: bool,
}

impl Default for CompatFlags {
    fn default() -> Self {
        Self {
            emissive_overrides_base_color: true,
            apply_normal_texture_scale: false,
            apply_occlusion: false,
        }
    }
}

/// # Shading Configuration
///
/// Everything a [`ShadingPipeline`](crate::pipeline::ShadingPipeline) decides at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Light evaluation model
    pub model: ShadingModel,
    /// Light kinds that contribute to the lit term
    pub lights: EnabledLights,
    /// Tone mapping operator
    pub tone_mapping: ToneMapping,
    /// Apply `pow(color, 1/gamma)` after tone mapping
    pub gamma_correction: bool,
    /// Display gamma used when `gamma_correction` is set
    pub gamma: f32,
    /// Lower bound on the light distance fed into inverse-square falloff.
    ///
    /// `None` leaves a light coincident with the surface to produce non-finite radiance.
    pub min_light_distance: Option<f32>,
    /// Material path quirks
    pub compat: CompatFlags,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            model: ShadingModel::default(),
            lights: EnabledLights::default(),
            tone_mapping: ToneMapping::default(),
            gamma_correction: false,
            gamma: 2.2,
            min_light_distance: None,
            compat: CompatFlags::default(),
        }
    }
}

impl Config for ShadingConfig {
    /// Gamma and the light distance floor must be positive and finite
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gamma_correction && !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::Invalid {
                field: "gamma",
                reason: format!("must be a positive finite number, got {}", self.gamma),
            });
        }

        if let Some(distance) = self.min_light_distance {
            if !(distance.is_finite() && distance > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "min_light_distance",
                    reason: format!("must be a positive finite number, got {distance}"),
                });
            }
        }

        Ok(())
    }
}

impl ShadingConfig {
    /// Set the light evaluation model
    pub fn with_model(mut self, model: ShadingModel) -> Self {
        self.model = model;
        self
    }

    /// Set which light kinds are accumulated
    pub fn with_lights(mut self, lights: EnabledLights) -> Self {
        self.lights = lights;
        self
    }

    /// Set the tone mapping operator
    pub fn with_tone_mapping(mut self, tone_mapping: ToneMapping) -> Self {
        self.tone_mapping = tone_mapping;
        self
    }

    /// Enable gamma correction with the given display gamma
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma_correction = true;
        self.gamma = gamma;
        self
    }

    /// Floor light distances at `distance`
    pub fn with_min_light_distance(mut self, distance: f32) -> Self {
        self.min_light_distance = Some(distance);
        self
    }

    /// Replace the compatibility flags
    pub fn with_compat(mut self, compat: CompatFlags) -> Self {
        self.compat = compat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_default_config_matches_active_path() {
        let config = ShadingConfig::default();

        assert_eq!(config.model, ShadingModel::CookTorrance);
        assert_eq!(config.lights, EnabledLights::POINT_ONLY);
        assert_eq!(config.tone_mapping, ToneMapping::Reinhard);
        assert!(!config.gamma_correction);
        assert!(config.compat.emissive_overrides_base_color);
        assert!(!config.compat.apply_normal_texture_scale);
        assert!(!config.compat.apply_occlusion);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cook_torrance_supports_point_only() {
        assert!(ShadingModel::CookTorrance.supports(LightKind::Point));
        assert!(!ShadingModel::CookTorrance.supports(LightKind::Directional));
        assert!(!ShadingModel::CookTorrance.supports(LightKind::Spot));
        assert!(LightKind::ALL
            .into_iter()
            .all(|kind| ShadingModel::BlinnPhong.supports(kind)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ShadingConfig::default()
            .with_model(ShadingModel::BlinnPhong)
            .with_lights(EnabledLights::ALL)
            .with_gamma(2.4);

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ShadingConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: ShadingConfig = toml::from_str(
            r#"
            model = "blinn_phong"

            [lights]
            spot = true
            "#,
        )
        .unwrap();

        assert_eq!(parsed.model, ShadingModel::BlinnPhong);
        assert!(parsed.lights.point);
        assert!(parsed.lights.spot);
        assert!(!parsed.lights.directional);
        assert_eq!(parsed.tone_mapping, ToneMapping::Reinhard);
    }

    #[test]
    fn test_ron_parse() {
        let parsed: ShadingConfig =
            ron::from_str("(tone_mapping: none, compat: (emissive_overrides_base_color: false))")
                .unwrap();

        assert_eq!(parsed.tone_mapping, ToneMapping::None);
        assert!(!parsed.compat.emissive_overrides_base_color);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_gamma = ShadingConfig::default().with_gamma(0.0);
        assert!(matches!(
            bad_gamma.validate(),
            Err(ConfigError::Invalid { field: "gamma", .. })
        ));

        let bad_floor = ShadingConfig::default().with_min_light_distance(-1.0);
        assert!(matches!(
            bad_floor.validate(),
            Err(ConfigError::Invalid {
                field: "min_light_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = ShadingConfig::default().save_to_file("shading.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        // format is checked before the file is touched
        let result = ShadingConfig::load_from_file("does/not/exist/shading.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parsing_validates_values() {
        let result = ShadingConfig::from_str_as(
            "gamma_correction = true\ngamma = -2.0\n",
            ConfigFormat::Toml,
        );
        assert!(matches!(result, Err(ConfigError::Invalid { field: "gamma", .. })));

        let result = ShadingConfig::from_str_as("(min_light_distance: Some(0.0))", ConfigFormat::Ron);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "min_light_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let config = ShadingConfig::default()
            .with_model(ShadingModel::BlinnPhong)
            .with_lights(EnabledLights::ALL)
            .with_min_light_distance(0.01);

        for name in ["surface_shading_round_trip.toml", "surface_shading_round_trip.ron"] {
            let path = std::env::temp_dir().join(name);
            config.save_to_file(&path).unwrap();
            let loaded = ShadingConfig::load_from_file(&path).unwrap();
            std::fs::remove_file(&path).unwrap();
            assert_eq!(loaded, config, "{name}");
        }
    }
}
