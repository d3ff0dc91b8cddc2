//! Trigger surface: the two entry points the core exposes outward.
//!
//! `generate` rebuilds the whole chunk set from the bound terrain sampler;
//! `tick` runs the per-frame visibility classification and wind update.
//! The chunk set is swapped atomically: consumers only ever observe the
//! previous complete set or the new complete set. Taking `&mut self` for
//! generation serializes regeneration requests.

use crate::core::error::Error;
use crate::core::types::Result;
use crate::generation::{ChunkSet, GenerationConfig, GenerationStats, VegetationPipeline};
use crate::lod::{CameraState, VisibilityClassifier};
use crate::math::Aabb;
use crate::terrain::TerrainSampler;
use crate::wind::WindState;

/// Owns the pipeline, classifier, wind feed, and the current chunk set.
pub struct VegetationSystem {
    pipeline: VegetationPipeline,
    classifier: VisibilityClassifier,
    wind: WindState,
    sampler: Option<Box<dyn TerrainSampler>>,
    chunks: Option<ChunkSet>,
}

impl VegetationSystem {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let classifier = VisibilityClassifier::new(config.lod)?;
        let pipeline = VegetationPipeline::new(config)?;
        Ok(Self {
            pipeline,
            classifier,
            wind: WindState::default(),
            sampler: None,
            chunks: None,
        })
    }

    /// Bind the terrain collaborator the generator samples from.
    pub fn bind_sampler(&mut self, sampler: Box<dyn TerrainSampler>) {
        self.sampler = Some(sampler);
    }

    /// Rebuild the chunk set. The previous set stays in place until the new
    /// one is complete, then is replaced wholesale.
    pub fn generate(&mut self) -> Result<&ChunkSet> {
        let sampler = self
            .sampler
            .as_deref()
            .ok_or(Error::MissingCollaborator("terrain sampler"))?;
        let set = self.pipeline.generate(sampler)?;
        Ok(&*self.chunks.insert(set))
    }

    /// Per-frame update: advance wind, then reclassify chunks.
    ///
    /// `bounds_visible` is the renderer's answer for each chunk bounding
    /// volume. Without a camera the classification is skipped and chunks
    /// keep their last-known buckets.
    pub fn tick(
        &mut self,
        camera: Option<&CameraState>,
        bounds_visible: impl Fn(&Aabb) -> bool,
        dt: f32,
    ) {
        self.wind.tick(dt);
        if let Some(set) = &mut self.chunks {
            self.classifier.classify(&mut set.chunks, camera, bounds_visible);
        }
    }

    /// Current complete chunk set, if one has been generated.
    pub fn chunks(&self) -> Option<&ChunkSet> {
        self.chunks.as_ref()
    }

    pub fn stats(&self) -> Option<&GenerationStats> {
        self.chunks.as_ref().map(|set| &set.stats)
    }

    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    pub fn wind_mut(&mut self) -> &mut WindState {
        &mut self.wind
    }

    pub fn config(&self) -> &GenerationConfig {
        self.pipeline.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::lod::LodBucket;
    use crate::terrain::FlatTerrain;

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            domain_width: 32,
            domain_height: 32,
            chunk_size: 16,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_without_sampler_fails() {
        let mut system = VegetationSystem::new(small_config()).unwrap();
        let err = system.generate().unwrap_err();
        assert!(matches!(err, Error::MissingCollaborator(_)));
        assert!(system.chunks().is_none());
    }

    #[test]
    fn test_generate_and_tick() {
        let mut system = VegetationSystem::new(small_config()).unwrap();
        system.bind_sampler(Box::new(FlatTerrain::default()));

        let set = system.generate().unwrap();
        assert_eq!(set.grid, (2, 2));

        let camera = CameraState { position: Vec3::new(-500.0, 0.0, 0.0) };
        system.tick(Some(&camera), |_| true, 0.016);

        let set = system.chunks().unwrap();
        assert!(set.chunks.iter().all(|c| c.bucket == LodBucket::Lod2));
        assert!(system.wind().time() > 0.0);
    }

    #[test]
    fn test_regeneration_replaces_chunk_set() {
        let mut system = VegetationSystem::new(small_config()).unwrap();
        system.bind_sampler(Box::new(FlatTerrain::default()));

        let first_stats = system.generate().unwrap().stats.clone();
        let second_stats = system.generate().unwrap().stats.clone();
        // Same seed and sampler: the replacement set is identical
        assert_eq!(first_stats, second_stats);
    }

    #[test]
    fn test_tick_without_chunks_is_harmless() {
        let mut system = VegetationSystem::new(small_config()).unwrap();
        system.tick(None, |_| true, 0.5);
        assert_eq!(system.wind().time(), 0.5);
    }
}
