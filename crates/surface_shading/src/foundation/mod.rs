//! Foundation types shared by every shading stage

pub mod math;
