//! Error types for building shading inputs and pipelines
//!
//! Per-fragment evaluation itself never fails; these errors surface when the
//! host assembles frame data, decodes uniform blocks, loads textures, or builds
//! a pipeline from configuration.

use thiserror::Error;

use crate::config::{ConfigError, ShadingModel};
use crate::lighting::LightKind;

/// Shading setup errors
#[derive(Debug, Error)]
pub enum ShadingError {
    /// More lights of one kind than the per-frame list can hold
    #[error("{kind} light list is full (capacity {capacity})")]
    LightCapacityExceeded {
        /// Kind of the rejected light
        kind: LightKind,
        /// Fixed capacity of the list
        capacity: usize,
    },

    /// A uniform block declares an active light count above capacity
    #[error("uniform declares {count} {kind} lights but capacity is {capacity}")]
    InvalidLightCount {
        /// Kind of the offending list
        kind: LightKind,
        /// Declared count
        count: u32,
        /// Fixed capacity of the list
        capacity: usize,
    },

    /// The configured model has no evaluator for an enabled light kind
    #[error("{model:?} shading has no evaluator for {kind} lights")]
    UnsupportedLight {
        /// Configured model
        model: ShadingModel,
        /// Enabled light kind without an evaluator
        kind: LightKind,
    },

    /// A texture could not be created or decoded
    #[error("Texture error: {0}")]
    Texture(String),

    /// Configuration failed to load or validate
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for shading setup
pub type ShadingResult<T> = Result<T, ShadingError>;
