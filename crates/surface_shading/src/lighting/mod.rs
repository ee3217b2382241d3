//! Lighting inputs
//!
//! Light definitions for the three supported kinds, the bounded per-frame
//! lists that hold them, and the per-frame data block shared by every fragment.

pub mod frame;
pub mod light_list;
pub mod lights;

pub use frame::PerFrameData;
pub use light_list::{LightList, MAX_LIGHTS_PER_KIND};
pub use lights::{DirectionalLight, Light, LightKind, PointLight, SpotLight};
