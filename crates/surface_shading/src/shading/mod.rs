//! Light evaluation, accumulation and final composition
//!
//! Two evaluator families share the [`LightEvaluator`] interface:
//! [`BlinnPhong`] covers every light kind, [`CookTorrance`] covers point
//! lights. Which one runs is decided by
//! [`ShadingModel`](crate::config::ShadingModel) when a pipeline is built.

pub mod blinn_phong;
pub mod composite;
pub mod cook_torrance;
pub mod evaluator;

pub use blinn_phong::BlinnPhong;
pub use composite::{compose, gamma_correct, tone_map, tone_map_reinhard, CompositeOptions};
pub use cook_torrance::{evaluate_brdf, BrdfSample, CookTorrance};
pub use evaluator::{accumulate, LightEvaluator};
