//! Vegetation generation pipeline.
//!
//! Partitions the domain into a chunk grid and, per chunk, walks the unit
//! placement lattice: acceptance-noise masking, surface-weight checks, type
//! selection, dispersion/orientation/scale jitter, and blade emission under
//! a hard per-chunk vertex budget.
//!
//! Noise-driven decisions are pure; every random draw comes from a ChaCha
//! rng seeded from (seed, chunk coord), so chunks are reproducible and the
//! rayon parallel build stays deterministic.

pub mod config;

pub use config::GenerationConfig;

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::chunk::ChunkRecord;
use crate::core::types::{Quat, Result, Vec3};
use crate::math::color::rgb_to_hsv;
use crate::math::Aabb;
use crate::noise::GradientNoise;
use crate::terrain::TerrainSampler;
use crate::vegetation::{build_blade, MeshBuffers, Placement, TypeSelector};

/// Counters describing one generation pass; truncation and skips are
/// observable here rather than being errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub chunks_built: usize,
    pub chunks_skipped: usize,
    pub points_rejected_noise: usize,
    pub points_rejected_weight: usize,
    pub instances_emitted: usize,
    pub budget_truncated_chunks: usize,
    pub total_vertices: usize,
}

impl GenerationStats {
    fn merge(&mut self, other: &GenerationStats) {
        self.chunks_built += other.chunks_built;
        self.chunks_skipped += other.chunks_skipped;
        self.points_rejected_noise += other.points_rejected_noise;
        self.points_rejected_weight += other.points_rejected_weight;
        self.instances_emitted += other.instances_emitted;
        self.budget_truncated_chunks += other.budget_truncated_chunks;
        self.total_vertices += other.total_vertices;
    }
}

/// The complete output of one generation pass. Consumers only ever see a
/// finished set; partial results are never exposed.
#[derive(Clone, Debug)]
pub struct ChunkSet {
    /// Grid dimensions (columns, rows).
    pub grid: (u32, u32),
    /// Non-empty chunks in grid order.
    pub chunks: Vec<ChunkRecord>,
    pub stats: GenerationStats,
}

impl ChunkSet {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Derive the per-chunk rng from the master seed and chunk coordinate.
/// SplitMix-style diffusion so neighboring chunks decorrelate.
fn chunk_rng(seed: u32, cx: u32, cz: u32) -> ChaCha8Rng {
    let mut state = ((cx as u64) << 32 | cz as u64)
        ^ (seed as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    state = (state ^ (state >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    state = (state ^ (state >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    ChaCha8Rng::seed_from_u64(state ^ (state >> 31))
}

/// Drives one generation pass over the whole domain.
pub struct VegetationPipeline {
    config: GenerationConfig,
    /// Placement acceptance mask; also sampled at `height_noise_scale` for
    /// the per-point height-variation modifier.
    placement_noise: GradientNoise,
    /// Type-selection field, decorrelated from placement by a derived seed.
    selection_noise: GradientNoise,
}

impl VegetationPipeline {
    /// Validate the configuration and build the noise fields.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;

        let mut placement_params = config.placement_noise.clone();
        placement_params.seed = config.seed;
        let placement_noise = GradientNoise::new(placement_params)?;

        let mut selection_params = config.placement_noise.clone();
        selection_params.seed = config.seed.wrapping_mul(0x9E37_79B9).wrapping_add(1);
        let selection_noise = GradientNoise::new(selection_params)?;

        Ok(Self { config, placement_noise, selection_noise })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate the full chunk set. Synchronous: runs to completion and
    /// returns only a finished set.
    pub fn generate(&self, sampler: &dyn TerrainSampler) -> Result<ChunkSet> {
        let (grid_w, grid_h) = self.config.grid_dims();

        let mut coords = Vec::with_capacity((grid_w * grid_h) as usize);
        for cz in 0..grid_h {
            for cx in 0..grid_w {
                coords.push((cx, cz));
            }
        }

        log::info!(
            "generating vegetation over {}x{}m ({}x{} chunk grid)...",
            self.config.domain_width, self.config.domain_height, grid_w, grid_h
        );

        let start = std::time::Instant::now();
        let results: Vec<_> = coords
            .par_iter()
            .map(|&(cx, cz)| self.build_chunk(sampler, cx, cz))
            .collect();

        let mut stats = GenerationStats::default();
        let mut chunks = Vec::new();
        for (record, chunk_stats) in results {
            stats.merge(&chunk_stats);
            if let Some(record) = record {
                chunks.push(record);
            }
        }

        let elapsed = start.elapsed();
        log::info!(
            "generated {} chunks ({} skipped, {} truncated, {} blades, {} vertices) in {:.2}s",
            stats.chunks_built, stats.chunks_skipped, stats.budget_truncated_chunks,
            stats.instances_emitted, stats.total_vertices, elapsed.as_secs_f64()
        );

        Ok(ChunkSet { grid: (grid_w, grid_h), chunks, stats })
    }

    /// Build one chunk, or None when no geometry was emitted.
    fn build_chunk(
        &self,
        sampler: &dyn TerrainSampler,
        cx: u32,
        cz: u32,
    ) -> (Option<ChunkRecord>, GenerationStats) {
        let config = &self.config;
        let mut stats = GenerationStats::default();
        let mut rng = chunk_rng(config.seed, cx, cz);

        let selector = TypeSelector::new(
            &config.types.types,
            &self.selection_noise,
            config.selection_policy,
        );

        let x0 = cx * config.chunk_size;
        let z0 = cz * config.chunk_size;
        let x1 = (x0 + config.chunk_size).min(config.domain_width);
        let z1 = (z0 + config.chunk_size).min(config.domain_height);

        let mut mesh = MeshBuffers::new();
        let mut centroid_sum = Vec3::ZERO;
        let mut placements = 0usize;
        let mut truncated = false;

        'points: for z in z0..z1 {
            for x in x0..x1 {
                let (px, pz) = (x as f32, z as f32);

                let acceptance = self.placement_noise.sample(px, pz);
                if acceptance <= config.placement_threshold {
                    stats.points_rejected_noise += 1;
                    continue;
                }

                let surface = sampler.surface_color(px, pz, &config.eligible_layers);
                if surface.total_weight < config.min_surface_weight {
                    stats.points_rejected_weight += 1;
                    continue;
                }

                for _ in 0..config.density {
                    let Some(ty) = selector.select(px, pz, &mut rng) else {
                        continue;
                    };

                    // Hard cap: stop the chunk the moment the next blade
                    // would not fit, keeping what already exists
                    if mesh.vertex_count() + ty.blade_vertex_count()
                        > config.max_vertices_per_chunk
                    {
                        truncated = true;
                        break 'points;
                    }

                    let (dx, dz) = disperse(&mut rng, config.dispersion_radius);
                    let (wx, wz) = (px + dx, pz + dz);
                    let position = Vec3::new(wx, sampler.height(wx, wz), wz);

                    let align = Quat::from_rotation_arc(Vec3::Y, sampler.normal(wx, wz));
                    let yaw = if config.random_yaw {
                        rng.gen_range(0.0..TAU)
                    } else {
                        0.0
                    };
                    let tilt = rng.gen_range(-ty.tilt_range..=ty.tilt_range);
                    let rotation =
                        align * Quat::from_rotation_y(yaw) * Quat::from_rotation_x(tilt);

                    let height_mod = 1.0
                        + (self
                            .placement_noise
                            .sample_scaled(wx, wz, config.height_noise_scale)
                            - 0.5)
                            * 2.0
                            * config.height_variation;
                    let scale = rng.gen_range(ty.scale_min..=ty.scale_max) * height_mod;

                    let [h, s, v] = rgb_to_hsv(surface.color);
                    let color_hsv = [
                        (h + rng.gen_range(-ty.hue_jitter..=ty.hue_jitter)).rem_euclid(1.0),
                        (s + rng.gen_range(-ty.saturation_jitter..=ty.saturation_jitter))
                            .clamp(0.0, 1.0),
                        (v + rng.gen_range(-ty.value_jitter..=ty.value_jitter))
                            .clamp(0.0, 1.0),
                    ];

                    let placement = Placement { position, rotation, scale, color_hsv, ty };
                    build_blade(&mut mesh, &placement, config.ao);

                    centroid_sum += position;
                    placements += 1;
                    stats.instances_emitted += 1;
                }
            }
        }

        if truncated {
            stats.budget_truncated_chunks += 1;
            log::debug!(
                "chunk ({}, {}) hit vertex budget at {} vertices",
                cx, cz, mesh.vertex_count()
            );
        }

        let Some(bounds) = Aabb::from_points(&mesh.positions) else {
            stats.chunks_skipped += 1;
            return (None, stats);
        };

        stats.chunks_built += 1;
        stats.total_vertices += mesh.vertex_count();
        let centroid = centroid_sum / placements as f32;
        (Some(ChunkRecord::new((cx, cz), mesh, bounds, centroid)), stats)
    }
}

/// Uniform random offset inside a disc of the given radius.
fn disperse(rng: &mut impl Rng, radius: f32) -> (f32, f32) {
    if radius <= 0.0 {
        return (0.0, 0.0);
    }
    let angle = rng.gen_range(0.0..TAU);
    let r = radius * rng.gen_range(0.0..1.0f32).sqrt();
    (angle.cos() * r, angle.sin() * r)
}
