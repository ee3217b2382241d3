//! Bounded per-frame light lists
//!
//! Each light kind gets its own ordered list holding at most
//! [`MAX_LIGHTS_PER_KIND`] entries. The length is the count of active lights,
//! so there is no separate count to fall out of sync.

use crate::error::{ShadingError, ShadingResult};

use super::lights::Light;

/// Maximum number of lights of a single kind per frame
pub const MAX_LIGHTS_PER_KIND: usize = 16;

/// Ordered list of lights with `0 <= len <= MAX_LIGHTS_PER_KIND`
#[derive(Debug, Clone, PartialEq)]
pub struct LightList<L> {
    lights: Vec<L>,
}

impl<L: Light> LightList<L> {
    /// Fixed capacity of every list
    pub const CAPACITY: usize = MAX_LIGHTS_PER_KIND;

    /// Create an empty list
    pub fn new() -> Self {
        Self {
            lights: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Build a list from lights, failing if there are more than the capacity
    pub fn from_lights(lights: impl IntoIterator<Item = L>) -> ShadingResult<Self> {
        let mut list = Self::new();
        for light in lights {
            list.push(light)?;
        }
        Ok(list)
    }

    /// Append a light
    pub fn push(&mut self, light: L) -> ShadingResult<()> {
        if self.lights.len() >= Self::CAPACITY {
            log::trace!("Rejecting {} light: list full", L::KIND);
            return Err(ShadingError::LightCapacityExceeded {
                kind: L::KIND,
                capacity: Self::CAPACITY,
            });
        }
        self.lights.push(light);
        Ok(())
    }

    /// Remove every light
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Number of active lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether no light is active
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Active lights in order
    pub fn as_slice(&self) -> &[L] {
        &self.lights
    }

    /// Iterate active lights in order
    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.lights.iter()
    }
}

impl<L: Light> Default for LightList<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, L: Light> IntoIterator for &'a LightList<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
