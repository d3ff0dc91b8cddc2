//! Chunk records: the generated geometry of one grid cell.

use crate::core::types::Vec3;
use crate::lod::LodBucket;
use crate::math::Aabb;
use crate::vegetation::MeshBuffers;

/// One non-empty chunk of generated vegetation geometry.
///
/// Geometry, bounds, and centroid are immutable after generation. The
/// classification fields (`visible`, `bucket`) are the only mutable state
/// and are written exclusively by the visibility classifier.
#[derive(Clone, Debug)]
pub struct ChunkRecord {
    /// Grid coordinate (column, row).
    pub coord: (u32, u32),
    pub mesh: MeshBuffers,
    pub bounds: Aabb,
    /// Arithmetic mean of all placement positions in this chunk.
    pub centroid: Vec3,
    /// Last classification: renderer-visible this tick.
    pub visible: bool,
    /// Last classification: distance bucket.
    pub bucket: LodBucket,
}

impl ChunkRecord {
    pub fn new(coord: (u32, u32), mesh: MeshBuffers, bounds: Aabb, centroid: Vec3) -> Self {
        Self {
            coord,
            mesh,
            bounds,
            centroid,
            // First-run default before any classification tick
            visible: true,
            bucket: LodBucket::Lod0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_visible_lod0() {
        let record = ChunkRecord::new(
            (2, 3),
            MeshBuffers::new(),
            Aabb::new(Vec3::ZERO, Vec3::ONE),
            Vec3::splat(0.5),
        );
        assert!(record.visible);
        assert_eq!(record.bucket, LodBucket::Lod0);
        assert_eq!(record.coord, (2, 3));
        assert_eq!(record.vertex_count(), 0);
    }
}
