//! Type selection: which vegetation kind governs a placement point.
//!
//! Selection noise is deterministic; only the blended-policy accept draws and
//! the planting gate consume the seeded rng passed down the call chain.

use rand::Rng;

use crate::noise::GradientNoise;
use crate::vegetation::types::VegetationType;

/// How acceptance ranges map a noise value to a type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionPolicy {
    /// First type whose acceptance range contains the value wins.
    Discrete,
    /// Ranges are widened by `transition` on both ends; inside the widened
    /// range a type accepts with probability decaying linearly from 1 at the
    /// range center to 0 at the widened edge. First accept wins.
    Blended { transition: f32 },
}

/// Picks a vegetation type (or none) for a coordinate.
pub struct TypeSelector<'a> {
    types: &'a [VegetationType],
    noise: &'a GradientNoise,
    policy: SelectionPolicy,
}

impl<'a> TypeSelector<'a> {
    pub fn new(
        types: &'a [VegetationType],
        noise: &'a GradientNoise,
        policy: SelectionPolicy,
    ) -> Self {
        Self { types, noise, policy }
    }

    /// Select the type governing (x, z), or None.
    ///
    /// None means "emit nothing here": either the list is empty or the
    /// chosen type's planting gate rejected the point. The planting gate is
    /// an independent draw against `clamp(density / 5, 0, 1)`.
    pub fn select(&self, x: f32, z: f32, rng: &mut impl Rng) -> Option<&'a VegetationType> {
        if self.types.is_empty() {
            return None;
        }

        let chosen = match self.policy {
            SelectionPolicy::Discrete => self.select_discrete(x, z),
            SelectionPolicy::Blended { transition } => {
                self.select_blended(x, z, transition, rng)
            }
        };

        if rng.gen_range(0.0..1.0f32) < chosen.planting_probability() {
            Some(chosen)
        } else {
            None
        }
    }

    fn select_discrete(&self, x: f32, z: f32) -> &'a VegetationType {
        for ty in self.types {
            let value = self.noise.sample_scaled(x, z, ty.noise_scale);
            if ty.accepts(value) {
                return ty;
            }
        }
        // No range matched: fall back to the first type, never "none"
        &self.types[0]
    }

    fn select_blended(
        &self,
        x: f32,
        z: f32,
        transition: f32,
        rng: &mut impl Rng,
    ) -> &'a VegetationType {
        for ty in self.types {
            let value = self.noise.sample_scaled(x, z, ty.noise_scale);
            let center = (ty.range_min + ty.range_max) * 0.5;
            let half_width = (ty.range_max - ty.range_min) * 0.5 + transition.max(0.0);
            if half_width <= 0.0 {
                continue;
            }
            let probability = (1.0 - (value - center).abs() / half_width).clamp(0.0, 1.0);
            if probability > 0.0 && rng.gen_range(0.0..1.0f32) < probability {
                return ty;
            }
        }
        &self.types[0]
    }
}
