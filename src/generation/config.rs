//! Generation configuration for the vegetation pipeline.

use crate::core::error::Error;
use crate::core::types::Result;
use crate::lod::LodThresholds;
use crate::noise::GradientNoiseParams;
use crate::vegetation::{AoParams, SelectionPolicy, VegetationTypeTable};

/// All parameters of one generation pass. Validated before any chunk is
/// built; an invalid configuration aborts generation up front.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Master seed for all jitter/dispersion/yaw/probability draws.
    pub seed: u32,
    /// Generation domain size in meters; the placement lattice runs at unit
    /// resolution over [0, width) x [0, height).
    pub domain_width: u32,
    pub domain_height: u32,
    /// Chunk side length in meters.
    pub chunk_size: u32,
    /// Candidate instances per accepted lattice point.
    pub density: u32,
    /// Placement-acceptance noise field.
    pub placement_noise: GradientNoiseParams,
    /// Lattice points with acceptance noise at or below this are rejected.
    pub placement_threshold: f32,
    /// Minimum total surface-layer weight for a grass-eligible point.
    pub min_surface_weight: f32,
    /// Allow-list of surface layers contributing to blade color.
    pub eligible_layers: Vec<usize>,
    /// Scale of the height-variation sample; much higher frequency than the
    /// placement mask.
    pub height_noise_scale: f32,
    /// Amplitude of the height-variation modifier around 1.0, within
    /// [0, 1] so the modifier never goes negative.
    pub height_variation: f32,
    /// Radius of the random 2D dispersion around each lattice point.
    pub dispersion_radius: f32,
    /// Apply a random yaw to each blade.
    pub random_yaw: bool,
    /// Hard per-chunk vertex cap.
    pub max_vertices_per_chunk: usize,
    pub selection_policy: SelectionPolicy,
    pub ao: AoParams,
    pub types: VegetationTypeTable,
    pub lod: LodThresholds,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            domain_width: 128,
            domain_height: 128,
            chunk_size: 32,
            density: 2,
            placement_noise: GradientNoiseParams {
                scale: 18.0,
                ..Default::default()
            },
            placement_threshold: 0.35,
            min_surface_weight: 0.1,
            eligible_layers: vec![0, 1, 2],
            height_noise_scale: 3.0,
            height_variation: 0.25,
            dispersion_radius: 0.45,
            random_yaw: true,
            max_vertices_per_chunk: 60_000,
            selection_policy: SelectionPolicy::Discrete,
            ao: AoParams::default(),
            types: VegetationTypeTable::builtin(),
            lod: LodThresholds::default(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.domain_width == 0 || self.domain_height == 0 {
            return Err(Error::Configuration(format!(
                "generation domain must be non-empty, got {}x{}",
                self.domain_width, self.domain_height
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::Configuration(
                "chunk size must be positive".into(),
            ));
        }
        if self.max_vertices_per_chunk == 0 {
            return Err(Error::Configuration(
                "per-chunk vertex budget must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.placement_threshold) {
            return Err(Error::Configuration(format!(
                "placement threshold {} outside [0, 1]",
                self.placement_threshold
            )));
        }
        if !(self.height_noise_scale > 0.0) || !(self.dispersion_radius >= 0.0) {
            return Err(Error::Configuration(
                "height noise scale must be positive and dispersion non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.height_variation) {
            return Err(Error::Configuration(format!(
                "height variation {} outside [0, 1]",
                self.height_variation
            )));
        }
        self.placement_noise.validate()?;
        self.types.validate()?;
        self.lod.validate()?;
        Ok(())
    }

    /// Chunk grid dimensions: `ceil(domain / chunk_size)` per axis.
    pub fn grid_dims(&self) -> (u32, u32) {
        (
            self.domain_width.div_ceil(self.chunk_size),
            self.domain_height.div_ceil(self.chunk_size),
        )
    }
}
