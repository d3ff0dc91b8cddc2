//! Distance-based LOD bucketing and per-tick visibility classification.
//!
//! Buckets are bookkeeping hints for the animation/shading collaborator;
//! no geometry is rebuilt or swapped on transition. Classification is
//! memoryless: each tick recomputes every chunk's state from scratch.

use crate::chunk::ChunkRecord;
use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::math::Aabb;

/// Discrete classification of a chunk for this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LodBucket {
    /// Nearest band.
    #[default]
    Lod0,
    /// Middle band.
    Lod1,
    /// Farthest band still inside render range (the render-distance cutoff
    /// itself belongs to the external renderer).
    Lod2,
    /// Bounding volume reported not visible this tick.
    Culled,
}

/// Two ascending distance thresholds splitting visible chunks into buckets.
#[derive(Clone, Copy, Debug)]
pub struct LodThresholds {
    pub near: f32,
    pub mid: f32,
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self { near: 30.0, mid: 60.0 }
    }
}

impl LodThresholds {
    pub fn validate(&self) -> Result<()> {
        if !(self.near > 0.0) || !(self.mid > self.near) || !self.mid.is_finite() {
            return Err(Error::Configuration(format!(
                "LOD thresholds must be ascending and positive, got [{}, {}]",
                self.near, self.mid
            )));
        }
        Ok(())
    }
}

/// Bucket for a camera distance; a pure function of the thresholds.
/// Never returns `Culled`; visibility is decided separately.
pub fn bucket_for_distance(distance: f32, thresholds: &LodThresholds) -> LodBucket {
    if distance < thresholds.near {
        LodBucket::Lod0
    } else if distance < thresholds.mid {
        LodBucket::Lod1
    } else {
        LodBucket::Lod2
    }
}

/// Camera state consumed by the classify tick.
#[derive(Clone, Copy, Debug)]
pub struct CameraState {
    pub position: Vec3,
}

/// Re-classifies every chunk each tick from camera distance and an
/// externally supplied bounding-volume visibility test.
pub struct VisibilityClassifier {
    thresholds: LodThresholds,
}

impl VisibilityClassifier {
    pub fn new(thresholds: LodThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// Classify all chunks for this tick.
    ///
    /// `bounds_visible` is the renderer's frustum/occlusion answer per
    /// bounding volume. Without a camera the update is skipped entirely and
    /// every chunk keeps its last-known classification.
    pub fn classify(
        &self,
        chunks: &mut [ChunkRecord],
        camera: Option<&CameraState>,
        bounds_visible: impl Fn(&Aabb) -> bool,
    ) {
        let Some(camera) = camera else {
            log::debug!("no camera bound, skipping visibility classification");
            return;
        };

        for chunk in chunks {
            if !bounds_visible(&chunk.bounds) {
                chunk.visible = false;
                chunk.bucket = LodBucket::Culled;
                continue;
            }
            chunk.visible = true;
            let distance = camera.position.distance(chunk.centroid);
            chunk.bucket = bucket_for_distance(distance, &self.thresholds);
        }
    }
}
