//! Cross-module tests that drive a whole [`ShadingPipeline`](crate::ShadingPipeline)

mod end_to_end;
mod pipeline_config;
