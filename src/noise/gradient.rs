//! Smooth gradient noise built on fractal Brownian motion.

use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::core::error::Error;
use crate::core::types::Result;

/// Parameters for a gradient noise field.
#[derive(Clone, Debug)]
pub struct GradientNoiseParams {
    pub seed: u32,
    /// Horizontal scale in meters (larger = smoother).
    pub scale: f32,
    /// FBM octaves (detail levels).
    pub octaves: u32,
    /// FBM persistence (0.5 typical).
    pub persistence: f32,
    /// FBM lacunarity (2.0 typical).
    pub lacunarity: f32,
}

impl Default for GradientNoiseParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 20.0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl GradientNoiseParams {
    /// Validate parameters, rejecting values that would produce NaN
    /// or degenerate fields.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::Configuration(format!(
                "gradient noise scale must be positive, got {}",
                self.scale
            )));
        }
        if self.octaves == 0 {
            return Err(Error::Configuration(
                "gradient noise needs at least one octave".into(),
            ));
        }
        if !self.persistence.is_finite() || !self.lacunarity.is_finite() {
            return Err(Error::Configuration(
                "gradient noise persistence/lacunarity must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Smooth fractal noise field producing values in [0, 1].
pub struct GradientNoise {
    params: GradientNoiseParams,
    fbm: Fbm<Perlin>,
}

impl GradientNoise {
    /// Create a field from validated parameters.
    pub fn new(params: GradientNoiseParams) -> Result<Self> {
        params.validate()?;
        let fbm = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);
        Ok(Self { params, fbm })
    }

    pub fn params(&self) -> &GradientNoiseParams {
        &self.params
    }

    /// Sample the field at (x, z) using the configured scale. Result in [0, 1].
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.sample_scaled(x, z, self.params.scale)
    }

    /// Sample at an explicit scale, overriding the configured one.
    ///
    /// Used where one field serves several concerns at different
    /// frequencies (placement masking vs height variation).
    pub fn sample_scaled(&self, x: f32, z: f32, scale: f32) -> f32 {
        let nx = (x / scale) as f64;
        let nz = (z / scale) as f64;

        // Fbm output is nominally [-1, 1]; remap and clamp to [0, 1]
        let value = (self.fbm.get([nx, nz]) + 1.0) / 2.0;
        (value as f32).clamp(0.0, 1.0)
    }
}
